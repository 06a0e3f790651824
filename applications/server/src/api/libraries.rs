/// Libraries API routes
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use shelf_core::types::{BookId, Library, LibraryBook};

#[derive(Debug, Deserialize)]
pub struct CreateLibraryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameLibraryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    pub book_id: BookId,
}

/// GET /api/libraries
/// The authenticated user's library names, name-ordered
pub async fn list_libraries(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<String>>> {
    let names = shelf_storage::libraries::list_names(&app_state.pool, auth.username()).await?;
    Ok(Json(names))
}

/// POST /api/libraries
/// Create a library for the authenticated user
pub async fn create_library(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreateLibraryRequest>,
) -> Result<Json<Library>> {
    let library =
        shelf_storage::libraries::create(&app_state.pool, auth.username(), &req.name).await?;
    Ok(Json(library))
}

/// PUT /api/libraries/:name
/// Rename a library
pub async fn rename_library(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<RenameLibraryRequest>,
) -> Result<Json<serde_json::Value>> {
    shelf_storage::libraries::rename(&app_state.pool, auth.username(), &name, &req.name).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/libraries/:name
/// Delete a library; memberships go with it
pub async fn delete_library(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    shelf_storage::libraries::delete(&app_state.pool, auth.username(), &name).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/libraries/:name/books
/// Member books in insertion order
pub async fn list_books(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<LibraryBook>>> {
    let books =
        shelf_storage::libraries::get_books(&app_state.pool, auth.username(), &name).await?;
    Ok(Json(books))
}

/// POST /api/libraries/:name/books
/// Add a book; adding an existing member succeeds without change
pub async fn add_book(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<AddBookRequest>,
) -> Result<Json<serde_json::Value>> {
    shelf_storage::libraries::add_book(&app_state.pool, auth.username(), &name, req.book_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/libraries/:name/books/:book_id
pub async fn remove_book(
    Path((name, book_id)): Path<(String, BookId)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    shelf_storage::libraries::remove_book(&app_state.pool, auth.username(), &name, book_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
