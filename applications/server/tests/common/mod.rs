/// Common test utilities and fixtures
use shelf_server::{services::AuthService, state::AppState};
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a migrated test database backed by a temp file
pub async fn create_test_pool() -> (SqlitePool, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let pool = shelf_storage::create_pool(&db_url)
        .await
        .expect("Failed to create pool");
    shelf_storage::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    (pool, temp_dir)
}

/// Build application state with a throwaway JWT secret
pub fn create_test_state(pool: SqlitePool) -> (AppState, Arc<AuthService>) {
    let auth_service = Arc::new(AuthService::new(
        "test-secret-key".to_string(),
        1, // 1 hour access
        1, // 1 day refresh
    ));
    let app_state = AppState::new(pool, Arc::clone(&auth_service));
    (app_state, auth_service)
}

/// Test user credentials
pub mod fixtures {
    pub const TEST_USERNAME: &str = "testuser";
    pub const TEST_PASSWORD: &str = "TestPassword123!";
}
