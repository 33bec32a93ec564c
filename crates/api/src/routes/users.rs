//! User profile routes.

use axum::{extract::State, http::StatusCode};
use domain::models::user::{UpdateUserRequest, UserResponse};
use domain::models::User;
use persistence::repositories::UserRepository;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiPath, CurrentUser, ValidatedJson};
use crate::response::Data;

/// GET /api/v1/users/me
pub async fn get_current_user(current: CurrentUser) -> Data<UserResponse> {
    Data::new(current.0.into())
}

/// PATCH /api/v1/users/me
pub async fn update_current_user(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<(StatusCode, Data<UserResponse>), ApiError> {
    let user: User = UserRepository::new(state.pool.clone())
        .update_username(current.id(), request.username.trim())
        .await?
        .into();

    info!(user_id = user.id, "Username updated");
    Ok((StatusCode::ACCEPTED, Data::new(user.into())))
}

/// GET /api/v1/users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    _current: CurrentUser,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Data<UserResponse>, ApiError> {
    let user: User = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?
        .into();

    Ok(Data::new(user.into()))
}
