/// Recommendations API routes
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, Json};
use serde::Deserialize;
use shelf_core::types::{
    BookId, LibraryId, NewRecommendation, Recommendation, RecommendationDetail, RecommendationKey,
};

#[derive(Debug, Deserialize)]
pub struct AddRecommendationRequest {
    pub library_id: LibraryId,
    pub read_book_id: BookId,
    pub recommended_book_id: BookId,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub library_id: LibraryId,
    pub read_book_id: BookId,
    pub recommended_book_id: BookId,
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRecommendationRequest {
    pub library_id: LibraryId,
    pub read_book_id: BookId,
    pub recommended_book_id: BookId,
}

/// POST /api/recommendations
///
/// Self-recommendation, the per-read-book cap, and exact duplicates are
/// all rejected before anything is written.
pub async fn add_recommendation(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<AddRecommendationRequest>,
) -> Result<Json<Recommendation>> {
    let recommendation = shelf_storage::recommendations::add(
        &app_state.pool,
        NewRecommendation {
            user_id: auth.username().to_string(),
            library_id: req.library_id,
            read_book_id: req.read_book_id,
            recommended_book_id: req.recommended_book_id,
            comment: req.comment,
        },
    )
    .await?;

    Ok(Json(recommendation))
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub read_book_id: BookId,
}

#[derive(Debug, serde::Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// GET /api/recommendations/count?read_book_id=...
/// How many distinct books the authenticated user recommends for a read book
pub async fn count_given(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    axum::extract::Query(query): axum::extract::Query<CountQuery>,
) -> Result<Json<CountResponse>> {
    let count = shelf_storage::recommendations::count_given(
        &app_state.pool,
        auth.username(),
        query.read_book_id,
    )
    .await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/recommendations
/// The authenticated user's recommendations, raw keys and comments
pub async fn list_recommendations(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Recommendation>>> {
    let recommendations =
        shelf_storage::recommendations::list_by_user(&app_state.pool, auth.username()).await?;
    Ok(Json(recommendations))
}

/// GET /api/recommendations/detailed
/// Joined titles, authors and library names for display
pub async fn list_recommendations_detailed(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<RecommendationDetail>>> {
    let detailed =
        shelf_storage::recommendations::list_detailed_by_user(&app_state.pool, auth.username())
            .await?;
    Ok(Json(detailed))
}

/// PUT /api/recommendations
/// Replace the commentary of one recommendation, identified by full key
pub async fn update_comment(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<serde_json::Value>> {
    let key = RecommendationKey {
        user_id: auth.username().to_string(),
        library_id: req.library_id,
        read_book_id: req.read_book_id,
        recommended_book_id: req.recommended_book_id,
    };
    shelf_storage::recommendations::update_comment(&app_state.pool, &key, &req.comment).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/recommendations
/// Delete one recommendation, identified by full key
pub async fn delete_recommendation(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<DeleteRecommendationRequest>,
) -> Result<Json<serde_json::Value>> {
    let key = RecommendationKey {
        user_id: auth.username().to_string(),
        library_id: req.library_id,
        read_book_id: req.read_book_id,
        recommended_book_id: req.recommended_book_id,
    };
    shelf_storage::recommendations::delete(&app_state.pool, &key).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
