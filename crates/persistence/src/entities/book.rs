//! Book entity (database row mapping).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database row mapping for the books table.
#[derive(Debug, Clone, FromRow)]
pub struct BookEntity {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: Decimal,
    pub tags: Vec<String>,
    pub description: String,
    pub cover_image_url: String,
    pub pages: i32,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i32,
}

impl From<BookEntity> for domain::models::Book {
    fn from(entity: BookEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            author: entity.author,
            isbn: entity.isbn,
            price: entity.price,
            tags: entity.tags,
            description: entity.description,
            cover_image_url: entity.cover_image_url,
            pages: entity.pages,
            stock: entity.stock,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            version: entity.version,
        }
    }
}
