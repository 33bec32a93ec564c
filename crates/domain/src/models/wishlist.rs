//! Wishlist domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for `POST /wishlist`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AddToWishlistRequest {
    #[validate(range(min = 1, message = "book_id must be positive"))]
    pub book_id: i64,
}

/// Response payload for `DELETE /wishlist/:book_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveFromWishlistResponse {
    pub book_id: i64,
    pub message: String,
}

impl RemoveFromWishlistResponse {
    pub fn new(book_id: i64) -> Self {
        Self {
            book_id,
            message: "Removed from wishlist".to_string(),
        }
    }
}
