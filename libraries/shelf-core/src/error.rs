/// Core error types for Shelf
use thiserror::Error;

/// Result type alias using `ShelfError`
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Core error type for Shelf
///
/// Variants fall into two families. Domain rejections (`NotFound`,
/// `Duplicate`, `InvalidInput`, `LimitExceeded`, `PermissionDenied`) mean
/// the request itself was invalid and can be corrected by the caller.
/// Infrastructure faults (`Database`, `Io`, `Serialization`) mean the
/// backing store or runtime failed; callers should retry later, not fix
/// their input.
#[derive(Error, Debug)]
pub enum ShelfError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity: String,
        /// Identifier that failed to resolve
        id: String,
    },

    /// An entity with the same key already exists
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A domain cap was reached
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Storage-related errors outside query execution
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl ShelfError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a duplicate entry error
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// True for errors the caller can fix by correcting the request,
    /// false for infrastructure faults.
    pub fn is_domain_rejection(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Duplicate(_)
                | Self::InvalidInput(_)
                | Self::LimitExceeded(_)
                | Self::PermissionDenied(_)
        )
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for ShelfError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
