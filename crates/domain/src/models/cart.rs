//! Shopping cart domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Largest quantity a single cart request may carry.
pub const MAX_CART_QUANTITY: i32 = 10;

/// One cart per user, created lazily.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub cart_id: i64,
    pub book_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A cart line joined with the book details a client needs to render it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemWithBook {
    pub id: i64,
    pub cart_id: i64,
    pub book_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub author: String,
    pub price: Decimal,
    pub cover_image_url: String,
    pub stock: i32,
}

/// Response payload for `GET /carts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub cart_id: i64,
    pub items: Vec<CartItemWithBook>,
}

/// Request payload for `POST /carts`. Quantities add up when the book is already present.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AddToCartRequest {
    #[validate(range(min = 1, message = "book_id must be positive"))]
    pub book_id: i64,

    #[validate(range(min = 1, max = 10, message = "Quantity must be between 1 and 10"))]
    pub quantity: i32,
}

/// Request payload for `PATCH /carts/items/:item_id`. Replaces the quantity.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1, max = 10, message = "Quantity must be between 1 and 10"))]
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        for (quantity, ok) in [(0, false), (1, true), (MAX_CART_QUANTITY, true), (11, false)] {
            let request = AddToCartRequest {
                book_id: 7,
                quantity,
            };
            assert_eq!(request.validate().is_ok(), ok, "quantity {}", quantity);
        }
    }

    #[test]
    fn test_book_id_must_be_positive() {
        let request = AddToCartRequest {
            book_id: 0,
            quantity: 1,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_cart_serializes_items_array() {
        let view = CartView {
            cart_id: 4,
            items: vec![],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["cart_id"], 4);
        assert!(json["items"].as_array().unwrap().is_empty());
    }
}
