/// Catalog API routes
use crate::{error::Result, error::ServerError, state::AppState};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shelf_core::types::{Book, BookId, RatingSummary, RecommendedBook};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub library_id: Option<i64>,
}

/// GET /api/books?title=... | ?author=... | ?author=...&year=...
///
/// Exactly one search mode applies; an empty result is a valid response.
pub async fn search_books(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Book>>> {
    let books = match (query.title, query.author, query.year) {
        (Some(title), None, None) => {
            shelf_storage::books::search_by_title(&app_state.pool, &title).await?
        }
        (None, Some(author), None) => {
            shelf_storage::books::search_by_author(&app_state.pool, &author).await?
        }
        (None, Some(author), Some(year)) => {
            shelf_storage::books::search_by_author_and_year(&app_state.pool, &author, year).await?
        }
        _ => {
            return Err(ServerError::BadRequest(
                "specify title, author, or author and year".to_string(),
            ))
        }
    };

    Ok(Json(books))
}

/// GET /api/books/:id
pub async fn get_book(
    Path(id): Path<BookId>,
    State(app_state): State<AppState>,
) -> Result<Json<Book>> {
    let book = shelf_storage::books::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Book not found".to_string()))?;

    Ok(Json(book))
}

/// GET /api/books/:id/recommendations[?library_id=...]
///
/// Recommended books with suggestion counts, most-suggested first; scoped
/// to one library when `library_id` is given, across all libraries
/// otherwise.
pub async fn recommended_for_book(
    Path(id): Path<BookId>,
    State(app_state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<Vec<RecommendedBook>>> {
    let recommended = match query.library_id {
        Some(library_id) => {
            shelf_storage::recommendations::find_recommended_with_count(
                &app_state.pool,
                library_id,
                id,
            )
            .await?
        }
        None => {
            shelf_storage::recommendations::find_recommended_with_count_all(&app_state.pool, id)
                .await?
        }
    };

    Ok(Json(recommended))
}

/// GET /api/books/:id/ratings
pub async fn ratings_for_book(
    Path(id): Path<BookId>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<shelf_core::types::Rating>>> {
    let ratings = shelf_storage::ratings::get_for_book(&app_state.pool, id).await?;
    Ok(Json(ratings))
}

/// GET /api/books/:id/ratings/summary
pub async fn rating_summary_for_book(
    Path(id): Path<BookId>,
    State(app_state): State<AppState>,
) -> Result<Json<RatingSummary>> {
    let summary = shelf_storage::ratings::summary(&app_state.pool, id).await?;
    Ok(Json(summary))
}
