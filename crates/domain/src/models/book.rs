//! Catalog domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A catalog entry. `version` starts at 1 and increases on every update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
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

/// Request payload for creating a book.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 255, message = "Author must be 1-255 characters"))]
    pub author: String,

    #[validate(custom(function = "shared::validation::validate_isbn"))]
    pub isbn: String,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price: Decimal,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_tags"))]
    pub tags: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,

    #[validate(url(message = "Invalid cover image URL"))]
    pub cover_image_url: String,

    #[validate(range(min = 1, max = 100000, message = "Pages must be between 1 and 100000"))]
    pub pages: i32,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,
}

/// Partial update for a book. `version` must be the version the client last read.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateBookRequest {
    #[validate(range(min = 1, message = "Version must be positive"))]
    pub version: i32,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Author must be 1-255 characters"))]
    pub author: Option<String>,

    #[validate(custom(function = "shared::validation::validate_isbn"))]
    pub isbn: Option<String>,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price: Option<Decimal>,

    #[validate(custom(function = "shared::validation::validate_tags"))]
    pub tags: Option<Vec<String>>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Invalid cover image URL"))]
    pub cover_image_url: Option<String>,

    #[validate(range(min = 1, max = 100000, message = "Pages must be between 1 and 100000"))]
    pub pages: Option<i32>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
}

/// Catalog search filters, all AND-combined.
///
/// `tag` may repeat in the query string and matches books sharing any of the
/// given tags. Price bounds of zero or less are ignored, as is `in_stock=false`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookSearchQuery {
    pub query: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(default, rename = "tag")]
    pub tags: Vec<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock: Option<bool>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl BookSearchQuery {
    pub fn text(&self) -> Option<&str> {
        non_empty(&self.query)
    }

    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn author(&self) -> Option<&str> {
        non_empty(&self.author)
    }

    pub fn tags(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn min_price(&self) -> Option<Decimal> {
        self.min_price.filter(|p| *p > Decimal::ZERO)
    }

    pub fn max_price(&self) -> Option<Decimal> {
        self.max_price.filter(|p| *p > Decimal::ZERO)
    }

    pub fn in_stock_only(&self) -> bool {
        self.in_stock.unwrap_or(false)
    }
}
