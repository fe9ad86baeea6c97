pub mod folder;
pub mod note;
pub mod user;

pub use folder::{Folder, FolderParams};
pub use note::{Note, NoteParams};
pub use user::{User, UserParams};
