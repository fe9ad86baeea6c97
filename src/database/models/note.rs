use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub body: Option<String>,
    pub folder_id: Option<i32>,
}

/// Column values for an insert or full replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteParams {
    pub title: String,
    pub body: Option<String>,
    pub folder_id: Option<i32>,
}
