//! Registration, login and account activation.

use axum::{extract::State, http::StatusCode};
use domain::models::user::{LoginRequest, RegisterRequest, RegisterResponse};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiPath, ValidatedJson};
use crate::response::{Data, Message};

/// POST /api/v1/authentication/user
///
/// Creates an inactive account and emails its activation token.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Data<RegisterResponse>), ApiError> {
    let response = state.auth_service().register(&request).await?;
    Ok((StatusCode::CREATED, Data::new(response)))
}

/// POST /api/v1/authentication/token
///
/// Returns a bearer token for an activated account.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Data<String>, ApiError> {
    let token = state.auth_service().login(&request).await?;
    Ok(Data::new(token))
}

/// PUT /api/v1/authentication/activate/:token
pub async fn activate(
    State(state): State<AppState>,
    ApiPath(token): ApiPath<String>,
) -> Result<Data<Message>, ApiError> {
    state.auth_service().activate(&token).await?;
    Ok(Message::new("User account activated successfully"))
}
