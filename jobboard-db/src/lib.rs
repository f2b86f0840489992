pub type DbBackend = sqlx::Sqlite;

pub mod companies;
pub mod error;
pub mod jobs;
pub mod query;

pub use error::StoreError;
pub use jobboard_db_connection::{create_pool, DbConnectionConfig, DbConnectionError, DbPool};
