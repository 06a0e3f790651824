/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shelf_core::types::{NewUser, User};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub national_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<User>> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(ServerError::BadRequest(
            "username and password are required".to_string(),
        ));
    }

    let password_hash = app_state.auth_service.hash_password(&req.password)?;

    let user = shelf_storage::users::create(
        &app_state.pool,
        NewUser {
            username: req.username,
            name: req.name,
            surname: req.surname,
            email: req.email,
            national_id: req.national_id,
        },
        &password_hash,
    )
    .await?;

    Ok(Json(user))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    // A missing account and a wrong password are indistinguishable to the
    // caller.
    let password_hash = shelf_storage::users::get_password_hash(&app_state.pool, &req.username)
        .await?
        .ok_or_else(|| ServerError::Auth("Invalid username or password".to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(ServerError::Auth("Invalid username or password".to_string()));
    }

    let access_token = app_state.auth_service.create_access_token(&req.username)?;
    let refresh_token = app_state.auth_service.create_refresh_token(&req.username)?;

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let username = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    let access_token = app_state.auth_service.create_access_token(&username)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}
