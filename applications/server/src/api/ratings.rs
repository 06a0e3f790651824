/// Ratings API routes
use crate::{error::Result, error::ServerError, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use shelf_core::types::{
    BookId, CriterionNotes, CriterionScores, NewRating, Rating, RatingDetail,
};

#[derive(Debug, Deserialize)]
pub struct SaveRatingRequest {
    pub book_id: BookId,
    pub library_name: String,
    pub scores: CriterionScores,
    #[serde(default)]
    pub notes: CriterionNotes,
    pub overall: f64,
    #[serde(default)]
    pub final_comment: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRatingRequest {
    pub scores: CriterionScores,
    #[serde(default)]
    pub notes: CriterionNotes,
    pub overall: f64,
    #[serde(default)]
    pub final_comment: String,
}

/// POST /api/ratings
///
/// One rating per (user, book); a repeat is rejected before any write, as
/// are out-of-range scores.
pub async fn save_rating(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<SaveRatingRequest>,
) -> Result<Json<Rating>> {
    // The rated book must exist in the catalog
    shelf_storage::books::get_by_id(&app_state.pool, req.book_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Book not found".to_string()))?;

    let rating = shelf_storage::ratings::save(
        &app_state.pool,
        auth.username(),
        req.book_id,
        &req.library_name,
        NewRating {
            scores: req.scores,
            notes: req.notes,
            overall: req.overall,
            final_comment: req.final_comment,
        },
    )
    .await?;

    Ok(Json(rating))
}

/// GET /api/ratings/:book_id
/// The authenticated user's own rating of a book, if any
pub async fn get_rating(
    Path(book_id): Path<BookId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Rating>> {
    let rating = shelf_storage::ratings::get(&app_state.pool, auth.username(), book_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Rating not found".to_string()))?;
    Ok(Json(rating))
}

/// GET /api/ratings/detailed
/// The authenticated user's ratings with book and library names
pub async fn list_ratings_detailed(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<RatingDetail>>> {
    let detailed =
        shelf_storage::ratings::list_detailed_by_user(&app_state.pool, auth.username()).await?;
    Ok(Json(detailed))
}

/// PUT /api/ratings/:book_id
/// Full replace of the authenticated user's rating of a book
pub async fn update_rating(
    Path(book_id): Path<BookId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<UpdateRatingRequest>,
) -> Result<Json<serde_json::Value>> {
    shelf_storage::ratings::update(
        &app_state.pool,
        auth.username(),
        book_id,
        NewRating {
            scores: req.scores,
            notes: req.notes,
            overall: req.overall,
            final_comment: req.final_comment,
        },
    )
    .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/ratings/:book_id
pub async fn delete_rating(
    Path(book_id): Path<BookId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<serde_json::Value>> {
    shelf_storage::ratings::delete(&app_state.pool, auth.username(), book_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
