//! Password change request entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the password_change_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordChangeRequestEntity {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
    pub expiry: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PasswordChangeRequestEntity> for domain::models::PasswordChangeRequest {
    fn from(entity: PasswordChangeRequestEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            token_hash: entity.token,
            expiry: entity.expiry,
            used: entity.used,
            created_at: entity.created_at,
        }
    }
}
