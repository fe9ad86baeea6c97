use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::database::manager::{self, DatabaseError};
use crate::database::models::{Folder, FolderParams, Note, NoteParams, User, UserParams};

/// One parameterized store operation per (entity, verb) pair.
///
/// `get_*` and `update_*` return `DatabaseError::NotFound` when no row has the
/// given id. `delete_*` succeeds whether or not the row existed.
#[async_trait]
pub trait Queries: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn list_notes(&self) -> Result<Vec<Note>, DatabaseError>;
    async fn get_note(&self, id: i32) -> Result<Note, DatabaseError>;
    async fn create_note(&self, params: NoteParams) -> Result<Note, DatabaseError>;
    async fn update_note(&self, id: i32, params: NoteParams) -> Result<Note, DatabaseError>;
    async fn delete_note(&self, id: i32) -> Result<(), DatabaseError>;

    async fn list_folders(&self) -> Result<Vec<Folder>, DatabaseError>;
    async fn get_folder(&self, id: i32) -> Result<Folder, DatabaseError>;
    async fn create_folder(&self, params: FolderParams) -> Result<Folder, DatabaseError>;
    async fn update_folder(&self, id: i32, params: FolderParams) -> Result<Folder, DatabaseError>;
    async fn delete_folder(&self, id: i32) -> Result<(), DatabaseError>;

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;
    async fn get_user(&self, id: i32) -> Result<User, DatabaseError>;
    async fn get_user_by_username(&self, username: &str) -> Result<User, DatabaseError>;
    async fn create_user(&self, params: UserParams) -> Result<User, DatabaseError>;
    async fn update_user(&self, id: i32, params: UserParams) -> Result<User, DatabaseError>;
    async fn delete_user(&self, id: i32) -> Result<(), DatabaseError>;
}

const NOTE_COLUMNS: &str = "id, title, body, folder_id";
const FOLDER_COLUMNS: &str = "id, user_id, name, description, parent_folder_id";
const USER_COLUMNS: &str = "id, username, email, password";

/// PostgreSQL implementation over the shared pool
#[derive(Clone)]
pub struct PgQueries {
    pool: PgPool,
}

impl PgQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn found<T>(row: Option<T>, entity: &str, key: impl std::fmt::Display) -> Result<T, DatabaseError> {
    row.ok_or_else(|| DatabaseError::NotFound(format!("{} {} not found", entity, key)))
}

#[async_trait]
impl Queries for PgQueries {
    async fn ping(&self) -> Result<(), DatabaseError> {
        manager::ping(&self.pool).await
    }

    // ---------------------------------------------------------------- notes

    async fn list_notes(&self) -> Result<Vec<Note>, DatabaseError> {
        let sql = format!("SELECT {} FROM notes ORDER BY id", NOTE_COLUMNS);
        let notes = sqlx::query_as::<_, Note>(&sql).fetch_all(&self.pool).await?;
        Ok(notes)
    }

    async fn get_note(&self, id: i32) -> Result<Note, DatabaseError> {
        let sql = format!("SELECT {} FROM notes WHERE id = $1", NOTE_COLUMNS);
        let row = sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found(row, "note", id)
    }

    async fn create_note(&self, params: NoteParams) -> Result<Note, DatabaseError> {
        let sql = format!(
            "INSERT INTO notes (title, body, folder_id) VALUES ($1, $2, $3) RETURNING {}",
            NOTE_COLUMNS
        );
        let note = sqlx::query_as::<_, Note>(&sql)
            .bind(params.title)
            .bind(params.body)
            .bind(params.folder_id)
            .fetch_one(&self.pool)
            .await?;
        debug!(note_id = note.id, "inserted note");
        Ok(note)
    }

    async fn update_note(&self, id: i32, params: NoteParams) -> Result<Note, DatabaseError> {
        let sql = format!(
            "UPDATE notes SET title = $2, body = $3, folder_id = $4 WHERE id = $1 RETURNING {}",
            NOTE_COLUMNS
        );
        let row = sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .bind(params.title)
            .bind(params.body)
            .bind(params.folder_id)
            .fetch_optional(&self.pool)
            .await?;
        found(row, "note", id)
    }

    async fn delete_note(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(note_id = id, rows = result.rows_affected(), "deleted note");
        Ok(())
    }

    // -------------------------------------------------------------- folders

    async fn list_folders(&self) -> Result<Vec<Folder>, DatabaseError> {
        let sql = format!("SELECT {} FROM folders ORDER BY id", FOLDER_COLUMNS);
        let folders = sqlx::query_as::<_, Folder>(&sql).fetch_all(&self.pool).await?;
        Ok(folders)
    }

    async fn get_folder(&self, id: i32) -> Result<Folder, DatabaseError> {
        let sql = format!("SELECT {} FROM folders WHERE id = $1", FOLDER_COLUMNS);
        let row = sqlx::query_as::<_, Folder>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found(row, "folder", id)
    }

    async fn create_folder(&self, params: FolderParams) -> Result<Folder, DatabaseError> {
        let sql = format!(
            "INSERT INTO folders (user_id, name, description, parent_folder_id) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            FOLDER_COLUMNS
        );
        let folder = sqlx::query_as::<_, Folder>(&sql)
            .bind(params.user_id)
            .bind(params.name)
            .bind(params.description)
            .bind(params.parent_folder_id)
            .fetch_one(&self.pool)
            .await?;
        debug!(folder_id = folder.id, "inserted folder");
        Ok(folder)
    }

    async fn update_folder(&self, id: i32, params: FolderParams) -> Result<Folder, DatabaseError> {
        let sql = format!(
            "UPDATE folders SET user_id = $2, name = $3, description = $4, parent_folder_id = $5 \
             WHERE id = $1 RETURNING {}",
            FOLDER_COLUMNS
        );
        let row = sqlx::query_as::<_, Folder>(&sql)
            .bind(id)
            .bind(params.user_id)
            .bind(params.name)
            .bind(params.description)
            .bind(params.parent_folder_id)
            .fetch_optional(&self.pool)
            .await?;
        found(row, "folder", id)
    }

    async fn delete_folder(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(folder_id = id, rows = result.rows_affected(), "deleted folder");
        Ok(())
    }

    // ---------------------------------------------------------------- users

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn get_user(&self, id: i32) -> Result<User, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found(row, "user", id)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        found(row, "user", username)
    }

    async fn create_user(&self, params: UserParams) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(params.username)
            .bind(params.email)
            .bind(params.password)
            .fetch_one(&self.pool)
            .await?;
        debug!(user_id = user.id, "inserted user");
        Ok(user)
    }

    async fn update_user(&self, id: i32, params: UserParams) -> Result<User, DatabaseError> {
        let sql = format!(
            "UPDATE users SET username = $2, email = $3, password = $4 WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(params.username)
            .bind(params.email)
            .bind(params.password)
            .fetch_optional(&self.pool)
            .await?;
        found(row, "user", id)
    }

    async fn delete_user(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(user_id = id, rows = result.rows_affected(), "deleted user");
        Ok(())
    }
}
