//! In-memory `Queries` used by the router tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Folder, FolderParams, Note, NoteParams, User, UserParams};
use crate::database::queries::Queries;

#[derive(Default)]
struct Tables {
    next_id: i32,
    notes: BTreeMap<i32, Note>,
    folders: BTreeMap<i32, Folder>,
    users: BTreeMap<i32, User>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryQueries {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryQueries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail like a lost connection
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of create/update/delete calls that reached the store
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn write(&self) -> Result<MutexGuard<'_, Tables>, DatabaseError> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(self.lock())
    }

    fn read(&self) -> Result<MutexGuard<'_, Tables>, DatabaseError> {
        self.check()?;
        Ok(self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn not_found(entity: &str, key: impl std::fmt::Display) -> DatabaseError {
    DatabaseError::NotFound(format!("{} {} not found", entity, key))
}

#[async_trait]
impl Queries for MemoryQueries {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check()
    }

    async fn list_notes(&self) -> Result<Vec<Note>, DatabaseError> {
        Ok(self.read()?.notes.values().cloned().collect())
    }

    async fn get_note(&self, id: i32) -> Result<Note, DatabaseError> {
        self.read()?.notes.get(&id).cloned().ok_or_else(|| not_found("note", id))
    }

    async fn create_note(&self, params: NoteParams) -> Result<Note, DatabaseError> {
        let mut tables = self.write()?;
        let note = Note {
            id: tables.next_id(),
            title: params.title,
            body: params.body,
            folder_id: params.folder_id,
        };
        tables.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: i32, params: NoteParams) -> Result<Note, DatabaseError> {
        let mut tables = self.write()?;
        let note = tables.notes.get_mut(&id).ok_or_else(|| not_found("note", id))?;
        note.title = params.title;
        note.body = params.body;
        note.folder_id = params.folder_id;
        Ok(note.clone())
    }

    async fn delete_note(&self, id: i32) -> Result<(), DatabaseError> {
        self.write()?.notes.remove(&id);
        Ok(())
    }

    async fn list_folders(&self) -> Result<Vec<Folder>, DatabaseError> {
        Ok(self.read()?.folders.values().cloned().collect())
    }

    async fn get_folder(&self, id: i32) -> Result<Folder, DatabaseError> {
        self.read()?.folders.get(&id).cloned().ok_or_else(|| not_found("folder", id))
    }

    async fn create_folder(&self, params: FolderParams) -> Result<Folder, DatabaseError> {
        let mut tables = self.write()?;
        let folder = Folder {
            id: tables.next_id(),
            user_id: params.user_id,
            name: params.name,
            description: params.description,
            parent_folder_id: params.parent_folder_id,
        };
        tables.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn update_folder(&self, id: i32, params: FolderParams) -> Result<Folder, DatabaseError> {
        let mut tables = self.write()?;
        let folder = tables.folders.get_mut(&id).ok_or_else(|| not_found("folder", id))?;
        folder.user_id = params.user_id;
        folder.name = params.name;
        folder.description = params.description;
        folder.parent_folder_id = params.parent_folder_id;
        Ok(folder.clone())
    }

    async fn delete_folder(&self, id: i32) -> Result<(), DatabaseError> {
        self.write()?.folders.remove(&id);
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    async fn get_user(&self, id: i32) -> Result<User, DatabaseError> {
        self.read()?.users.get(&id).cloned().ok_or_else(|| not_found("user", id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, DatabaseError> {
        self.read()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| not_found("user", username))
    }

    async fn create_user(&self, params: UserParams) -> Result<User, DatabaseError> {
        let mut tables = self.write()?;
        if tables.users.values().any(|u| u.username == params.username) {
            return Err(DatabaseError::Sqlx(sqlx::Error::Protocol(
                "duplicate key value violates unique constraint \"users_username_key\"".to_string(),
            )));
        }
        let user = User {
            id: tables.next_id(),
            username: params.username,
            email: params.email,
            password: params.password,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: i32, params: UserParams) -> Result<User, DatabaseError> {
        let mut tables = self.write()?;
        let user = tables.users.get_mut(&id).ok_or_else(|| not_found("user", id))?;
        user.username = params.username;
        user.email = params.email;
        user.password = params.password;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: i32) -> Result<(), DatabaseError> {
        self.write()?.users.remove(&id);
        Ok(())
    }
}
