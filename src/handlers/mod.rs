// handlers/mod.rs - One module per resource
//
// Collection routes (GET list, POST create) and item routes (GET, PUT, DELETE)
// share a module; the router in `app.rs` wires them to paths.

pub mod folders;
pub mod health;
pub mod login;
pub mod notes;
pub mod users;
pub mod utils;

pub use health::health;
pub use login::login;
pub use utils::method_not_allowed;
