//! Wishlist entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the wishlists table.
#[derive(Debug, Clone, FromRow)]
pub struct WishlistEntity {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WishlistEntity> for domain::models::WishlistEntry {
    fn from(entity: WishlistEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            book_id: entity.book_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
