//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{Role, User};

/// A users row joined with its role.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub role_id: i64,
    pub role_name: String,
    pub role_description: String,
    pub role_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            password_hash: entity.password_hash,
            is_active: entity.is_active,
            role: Role {
                id: entity.role_id,
                name: entity.role_name,
                description: entity.role_description,
                level: entity.role_level,
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
