pub mod connection;
pub mod matches;
pub mod models;
pub mod setup;

pub use connection::{DbConn, DbPool, create_memory_pool, create_pool, get_connection};
pub use models::*;
pub use setup::ensure_schema;
