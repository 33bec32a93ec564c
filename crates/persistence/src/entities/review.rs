//! Review entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the reviews table.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewEntity {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub rating: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReviewEntity> for domain::models::Review {
    fn from(entity: ReviewEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            book_id: entity.book_id,
            rating: entity.rating,
            content: entity.content,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
