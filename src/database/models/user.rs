use serde::Serialize;
use sqlx::FromRow;

/// Account row. The password is stored as supplied and never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    /// Plain equality against the stored password
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserParams {
    pub username: String,
    pub email: String,
    pub password: String,
}
