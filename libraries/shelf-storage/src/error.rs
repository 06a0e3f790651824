/// Storage-specific errors
use thiserror::Error;

/// Errors raised while setting up or migrating the store, as opposed to
/// the per-operation `shelf_core::ShelfError` the vertical slices return.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Migration(err.to_string())
    }
}

impl From<StorageError> for shelf_core::ShelfError {
    fn from(err: StorageError) -> Self {
        shelf_core::ShelfError::storage(err.to_string())
    }
}
