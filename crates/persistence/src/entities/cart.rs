//! Cart entities (database row mappings).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use domain::models::{Cart, CartItem, CartItemWithBook};

#[derive(Debug, Clone, FromRow)]
pub struct CartEntity {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CartEntity> for Cart {
    fn from(entity: CartEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CartItemEntity {
    pub id: i64,
    pub cart_id: i64,
    pub book_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CartItemEntity> for CartItem {
    fn from(entity: CartItemEntity) -> Self {
        Self {
            id: entity.id,
            cart_id: entity.cart_id,
            book_id: entity.book_id,
            quantity: entity.quantity,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// A cart_items row joined with the columns of its book.
#[derive(Debug, Clone, FromRow)]
pub struct CartItemWithBookEntity {
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

impl From<CartItemWithBookEntity> for CartItemWithBook {
    fn from(entity: CartItemWithBookEntity) -> Self {
        Self {
            id: entity.id,
            cart_id: entity.cart_id,
            book_id: entity.book_id,
            quantity: entity.quantity,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            title: entity.title,
            author: entity.author,
            price: entity.price,
            cover_image_url: entity.cover_image_url,
            stock: entity.stock,
        }
    }
}
