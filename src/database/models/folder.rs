use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    pub id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    /// Folders may nest; cycles are not checked
    pub parent_folder_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderParams {
    pub user_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub parent_folder_id: Option<i32>,
}
