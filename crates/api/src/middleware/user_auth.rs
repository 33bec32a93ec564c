//! Bearer token authentication middleware.
//!
//! Validates the session token, resolves the subject to a user with its role
//! and stores it as [`CurrentUser`] in the request extensions.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use domain::models::User;
use persistence::repositories::UserRepository;
use shared::jwt::{extract_user_id, JwtConfig};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Token part of an `Authorization: Bearer <token>` header.
///
/// The header must be exactly the scheme and one token separated by a single space.
pub fn bearer_token(value: &str) -> Option<&str> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

/// Validate the token and return the user ID it was issued for.
pub fn authenticate_token(jwt: &JwtConfig, token: &str) -> Result<i64, ApiError> {
    let claims = jwt.validate_token(token).map_err(|e| {
        tracing::debug!("JWT validation failed: {}", e);
        ApiError::Unauthorized("invalid or expired token".to_string())
    })?;
    extract_user_id(&claims).map_err(|_| ApiError::Unauthorized("invalid token subject".to_string()))
}

fn user_id_from_headers(jwt: &JwtConfig, headers: &HeaderMap) -> Result<i64, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            ApiError::Unauthorized("missing or invalid authorization header".to_string())
        })?;

    authenticate_token(jwt, token)
}

async fn resolve_user(state: &AppState, user_id: i64) -> Result<User, ApiError> {
    UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .map(User::from)
        .ok_or_else(|| ApiError::Unauthorized("user no longer exists".to_string()))
}

/// Middleware that requires a valid bearer token for an existing user.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // The request body is not Sync, so nothing borrowed from `req` may live across an await
    let user_id = match user_id_from_headers(&state.jwt, req.headers()) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match resolve_user(&state, user_id).await {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
