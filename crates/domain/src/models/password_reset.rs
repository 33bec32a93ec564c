//! Password reset domain models.
//!
//! A request moves from Requested to Consumed when the password is reset.
//! Verification is read-only. Once `expiry` has passed the request is Expired
//! regardless of whether it was ever verified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// A stored password change request. Only the token digest is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChangeRequest {
    pub id: i64,
    pub user_id: i64,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub expiry: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle state of a password change request at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetTokenState {
    Requested,
    Consumed,
    Expired,
}

/// Why a reset token can no longer be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResetTokenError {
    #[error("token already used")]
    AlreadyUsed,

    #[error("token expired")]
    Expired,
}

impl PasswordChangeRequest {
    pub fn state(&self, now: DateTime<Utc>) -> ResetTokenState {
        if self.used {
            ResetTokenState::Consumed
        } else if now > self.expiry {
            ResetTokenState::Expired
        } else {
            ResetTokenState::Requested
        }
    }

    /// Fails unless the request can still be verified or consumed.
    pub fn ensure_usable(&self, now: DateTime<Utc>) -> Result<(), ResetTokenError> {
        match self.state(now) {
            ResetTokenState::Requested => Ok(()),
            ResetTokenState::Consumed => Err(ResetTokenError::AlreadyUsed),
            ResetTokenState::Expired => Err(ResetTokenError::Expired),
        }
    }
}

/// Request payload for `POST /password/reset-request`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,
}

/// Query for `GET /password/request/verify`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyResetTokenQuery {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

/// Response payload for a successful verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResetTokenResponse {
    pub message: String,
    pub user_id: i64,
}

/// Request payload for `POST /password/reset`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ResetPasswordRequest {
    #[validate(range(min = 1, message = "user_id must be positive"))]
    pub user_id: i64,

    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,

    #[validate(length(min = 8, max = 255, message = "Password must be 8-255 characters"))]
    pub password: String,
}
