pub mod manager;
pub mod models;
pub mod queries;

#[cfg(test)]
pub mod memory;

pub use manager::DatabaseError;
pub use queries::{PgQueries, Queries};

