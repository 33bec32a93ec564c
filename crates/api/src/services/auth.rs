//! Registration, activation and login.

use std::sync::Arc;

use chrono::{Duration, Utc};
use domain::models::role::USER_ROLE;
use domain::models::user::{LoginRequest, NewUser, RegisterRequest, RegisterResponse};
use domain::models::User;
use domain::services::{MailError, Mailer};
use persistence::repositories::UserRepository;
use persistence::StoreError;
use shared::crypto::{generate_hashed_token, sha256_hex};
use shared::jwt::{JwtConfig, JwtError};
use shared::password::{hash_password, verify_password, PasswordError};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::middleware::metrics::record_user_registered;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account not activated")]
    NotActivated,

    #[error("invitation not found or expired")]
    InvalidInvitation,

    #[error("Could not deliver invitation: {0}")]
    Notification(#[from] MailError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::NotActivated => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::InvalidInvitation => ApiError::NotFound(err.to_string()),
            AuthError::Store(e) => e.into(),
            AuthError::Notification(_) | AuthError::Password(_) | AuthError::Token(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

/// Authentication service.
pub struct AuthService {
    users: UserRepository,
    jwt: Arc<JwtConfig>,
    mailer: Arc<dyn Mailer>,
    invitation_ttl_secs: i64,
}

impl AuthService {
    pub fn new(
        pool: PgPool,
        jwt: Arc<JwtConfig>,
        mailer: Arc<dyn Mailer>,
        invitation_ttl_secs: i64,
    ) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt,
            mailer,
            invitation_ttl_secs,
        }
    }

    /// Create an inactive account with an invitation and email the activation token.
    ///
    /// If the email cannot be sent the account is deleted again; a failure of
    /// that cleanup is logged and the delivery error is still reported.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, AuthError> {
        let new_user = NewUser {
            username: request.username.trim().to_string(),
            email: request.email.clone(),
            password_hash: hash_password(&request.password)?,
            role_name: USER_ROLE.to_string(),
            is_active: false,
        };

        let (token, token_hash) = generate_hashed_token();
        let expiry = Utc::now() + Duration::seconds(self.invitation_ttl_secs);

        let user: User = self
            .users
            .create_and_invite(&new_user, &token_hash, expiry)
            .await?
            .into();

        if let Err(mail_err) = self
            .mailer
            .send_invitation(&user.username, &user.email, &token)
            .await
        {
            error!(user_id = user.id, error = %mail_err, "Invitation email failed, removing account");
            if let Err(cleanup_err) = self.users.delete(user.id).await {
                warn!(user_id = user.id, error = %cleanup_err, "Failed to remove account after invitation failure");
            }
            return Err(mail_err.into());
        }

        record_user_registered();
        info!(user_id = user.id, "User registered");

        Ok(RegisterResponse {
            user: user.into(),
            token,
        })
    }

    /// Activate the account owning the plain invitation `token`.
    pub async fn activate(&self, token: &str) -> Result<i64, AuthError> {
        let user_id = self
            .users
            .activate(&sha256_hex(token))
            .await
            .map_err(|e| match e {
                StoreError::NotFound => AuthError::InvalidInvitation,
                other => AuthError::Store(other),
            })?;

        info!(user_id, "User activated");
        Ok(user_id)
    }

    /// Check the credentials and issue a session token.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, AuthError> {
        let user: User = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?
            .into();

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthError::NotActivated);
        }

        Ok(self.jwt.generate_token(user.id)?)
    }
}
