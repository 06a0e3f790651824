//! Shelf Storage
//!
//! `SQLite` access layer for Shelf: the recommendation-and-rating service
//! core sitting between the remote facade and the relational store.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each entity family owns its own queries and
//!   business rules (`books`, `libraries`, `recommendations`, `ratings`,
//!   `users`)
//! - **Stateless**: every operation is a free async function over a pool
//!   or caller-supplied connection; no state is shared between calls
//! - **Atomic multi-step sequences**: get-or-create and checked inserts
//!   run inside a single transaction backed by uniqueness constraints
//!
//! # Example
//!
//! ```rust,no_run
//! use shelf_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://shelf.db").await?;
//! run_migrations(&pool).await?;
//!
//! let libraries = shelf_storage::libraries::list_names(&pool, "alice").await?;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod books;
pub mod libraries;
pub mod ratings;
pub mod recommendations;
pub mod users;

pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://shelf.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true) // Create database file if it doesn't exist
        .journal_mode(SqliteJournalMode::Wal) // Use WAL mode for better concurrency
        .foreign_keys(true) // Library deletion cascades to memberships
        .busy_timeout(std::time::Duration::from_secs(30)); // Wait up to 30s for locks

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!(database_url, "sqlite pool created");

    Ok(pool)
}
