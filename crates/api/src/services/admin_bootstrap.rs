//! Creates the configured administrator account on startup.

use domain::models::role::ADMIN_ROLE;
use domain::models::user::NewUser;
use persistence::repositories::UserRepository;
use persistence::StoreError;
use shared::password::{hash_password, PasswordError};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::AdminBootstrapConfig;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// Outcome of a bootstrap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    NotConfigured,
    AlreadyExists,
    Created(i64),
}

/// Create an active admin with the configured credentials unless a user with
/// that email already exists. Safe to run on every start.
pub async fn bootstrap_admin(
    pool: &PgPool,
    config: &AdminBootstrapConfig,
) -> Result<BootstrapOutcome, BootstrapError> {
    if !config.is_configured() {
        if !config.bootstrap_email.is_empty() {
            warn!("admin.bootstrap_email is set but admin.bootstrap_password is empty, skipping bootstrap");
        }
        return Ok(BootstrapOutcome::NotConfigured);
    }

    let users = UserRepository::new(pool.clone());
    if users.find_by_email(&config.bootstrap_email).await?.is_some() {
        info!("Bootstrap admin already exists");
        return Ok(BootstrapOutcome::AlreadyExists);
    }

    let admin = NewUser {
        username: config.bootstrap_username.clone(),
        email: config.bootstrap_email.clone(),
        password_hash: hash_password(&config.bootstrap_password)?,
        role_name: ADMIN_ROLE.to_string(),
        is_active: true,
    };

    match users.create(&admin).await {
        Ok(entity) => {
            info!(user_id = entity.id, email = %config.bootstrap_email, "Bootstrap admin created");
            warn!("Remove admin.bootstrap_password from the configuration after the first start");
            Ok(BootstrapOutcome::Created(entity.id))
        }
        // Another instance won the race
        Err(StoreError::DuplicateEmail) => Ok(BootstrapOutcome::AlreadyExists),
        Err(e) => Err(e.into()),
    }
}
