//! Password reset routes.

use axum::{extract::State, http::StatusCode};
use domain::models::password_reset::{
    PasswordResetRequest, ResetPasswordRequest, VerifyResetTokenQuery, VerifyResetTokenResponse,
};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiQuery, ValidatedJson};
use crate::response::{Data, Message};

/// POST /api/v1/password/reset-request
///
/// Same answer whether or not the email belongs to an account.
pub async fn request_reset(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PasswordResetRequest>,
) -> Result<(StatusCode, Data<Message>), ApiError> {
    state
        .password_reset_service()
        .request_reset(&request.email)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Message::new("If the account exists, a password reset email has been sent"),
    ))
}

/// GET /api/v1/password/request/verify?token=
pub async fn verify_token(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<VerifyResetTokenQuery>,
) -> Result<Data<VerifyResetTokenResponse>, ApiError> {
    query.validate()?;
    let user_id = state.password_reset_service().verify(&query.token).await?;

    Ok(Data::new(VerifyResetTokenResponse {
        message: "Token is valid".to_string(),
        user_id,
    }))
}

/// POST /api/v1/password/reset
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> Result<Data<Message>, ApiError> {
    state.password_reset_service().reset(&request).await?;
    Ok(Message::new("Password has been reset"))
}
