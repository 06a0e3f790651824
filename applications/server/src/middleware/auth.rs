/// Authentication middleware
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// The authenticated username, stored in request extensions and usable as
/// an extractor in handlers. Every user-scoped storage call receives this
/// explicitly; there is no ambient session state.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        &self.0
    }
}

/// Middleware that extracts and validates JWT from Authorization header
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let username = auth_service.verify_access_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser(username));

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so AuthenticatedUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::Unauthorized("Not authenticated".to_string()))
    }
}
