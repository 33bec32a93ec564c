//! Password reset workflow.
//!
//! The plain token only ever travels by email; the stored row carries its
//! SHA-256 digest. Verification never changes state, a successful reset marks
//! the row used and keeps it so a replay is recognized.

use std::sync::Arc;

use chrono::{Duration, Utc};
use domain::models::password_reset::{ResetPasswordRequest, ResetTokenError};
use domain::models::{PasswordChangeRequest, User};
use domain::services::{MailError, Mailer};
use persistence::repositories::{PasswordRequestRepository, UserRepository};
use persistence::StoreError;
use shared::crypto::{generate_hashed_token, sha256_hex};
use shared::password::{hash_password, PasswordError};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::error::ApiError;

#[derive(Debug, Error)]
pub enum PasswordResetError {
    #[error("reset token not found")]
    TokenNotFound,

    #[error(transparent)]
    Unusable(#[from] ResetTokenError),

    #[error("token does not belong to this user")]
    WrongUser,

    #[error("Could not deliver reset email: {0}")]
    Notification(#[from] MailError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}

impl From<PasswordResetError> for ApiError {
    fn from(err: PasswordResetError) -> Self {
        match err {
            PasswordResetError::TokenNotFound => ApiError::NotFound(err.to_string()),
            PasswordResetError::Unusable(_) => ApiError::BadRequest(err.to_string()),
            PasswordResetError::WrongUser => ApiError::Unauthorized(err.to_string()),
            PasswordResetError::Store(e) => e.into(),
            PasswordResetError::Notification(_) | PasswordResetError::Password(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

pub struct PasswordResetService {
    users: UserRepository,
    requests: PasswordRequestRepository,
    mailer: Arc<dyn Mailer>,
    ttl_secs: i64,
}

impl PasswordResetService {
    pub fn new(pool: PgPool, mailer: Arc<dyn Mailer>, ttl_secs: i64) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            requests: PasswordRequestRepository::new(pool),
            mailer,
            ttl_secs,
        }
    }

    /// Create a reset request and email its token.
    ///
    /// Unknown addresses are accepted without doing anything so the endpoint
    /// cannot be used to probe for accounts.
    pub async fn request_reset(&self, email: &str) -> Result<(), PasswordResetError> {
        let Some(entity) = self.users.find_by_email(email).await? else {
            info!("Password reset requested for unknown email");
            return Ok(());
        };
        let user = User::from(entity);

        let (token, token_hash) = generate_hashed_token();
        let expiry = Utc::now() + Duration::seconds(self.ttl_secs);
        let request = self.requests.create(user.id, &token_hash, expiry).await?;

        if let Err(mail_err) = self
            .mailer
            .send_password_reset(&user.username, &user.email, &token)
            .await
        {
            error!(user_id = user.id, error = %mail_err, "Password reset email failed");
            if let Err(cleanup_err) = self.requests.delete(request.id).await {
                warn!(request_id = request.id, error = %cleanup_err, "Failed to remove undelivered reset request");
            }
            return Err(mail_err.into());
        }

        info!(user_id = user.id, "Password reset requested");
        Ok(())
    }

    async fn usable_request(&self, token: &str) -> Result<PasswordChangeRequest, PasswordResetError> {
        let request: PasswordChangeRequest = self
            .requests
            .find_by_token(&sha256_hex(token))
            .await?
            .ok_or(PasswordResetError::TokenNotFound)?
            .into();

        request.ensure_usable(Utc::now())?;
        Ok(request)
    }

    /// Check a token without consuming it; returns the owning user ID.
    pub async fn verify(&self, token: &str) -> Result<i64, PasswordResetError> {
        Ok(self.usable_request(token).await?.user_id)
    }

    /// Replace the password and mark the token used, in one transaction.
    pub async fn reset(&self, reset: &ResetPasswordRequest) -> Result<(), PasswordResetError> {
        let request = self.usable_request(&reset.token).await?;

        if request.user_id != reset.user_id {
            return Err(PasswordResetError::WrongUser);
        }

        let password_hash = hash_password(&reset.password)?;
        let consumed = self
            .requests
            .consume(request.id, request.user_id, &password_hash)
            .await?;

        // Either a concurrent reset got there first or the token expired meanwhile
        if !consumed {
            request.ensure_usable(Utc::now())?;
            return Err(ResetTokenError::AlreadyUsed.into());
        }

        info!(user_id = request.user_id, "Password reset completed");
        Ok(())
    }
}
