/// Shared application state
use crate::services::AuthService;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Only connection parameters and immutable services live here; request
/// handling keeps no other shared mutable state.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth_service: Arc<AuthService>) -> Self {
        Self { pool, auth_service }
    }
}
