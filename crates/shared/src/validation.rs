//! Common validation utilities for catalog and order payloads.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Highest accepted book or line-item price.
pub const MAX_PRICE: i64 = 100_000;

/// Highest accepted order total. Stays below the `NUMERIC(10, 2)` column limit.
pub const MAX_ORDER_TOTAL: i64 = 10_000_000;

/// Monetary values are stored with two decimal places.
const MONEY_SCALE: u32 = 2;

/// Maximum length of a single book tag.
pub const MAX_TAG_LENGTH: usize = 30;

lazy_static::lazy_static! {
    /// ISBN-13 as stored in the catalog: exactly thirteen digits, no hyphens.
    pub static ref ISBN_REGEX: regex::Regex = regex::Regex::new(r"^\d{13}$").unwrap();
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Validates an ISBN-13 against [`ISBN_REGEX`].
pub fn validate_isbn(isbn: &str) -> Result<(), ValidationError> {
    if ISBN_REGEX.is_match(isbn) {
        Ok(())
    } else {
        Err(error("isbn_format", "ISBN must be exactly 13 digits"))
    }
}

fn has_money_scale(amount: &Decimal) -> bool {
    amount.normalize().scale() <= MONEY_SCALE
}

/// Validates that a price is within 0 and [`MAX_PRICE`] with at most two decimals.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO || *price > Decimal::from(MAX_PRICE) {
        Err(error("price_range", "Price must be between 0 and 100000"))
    } else if !has_money_scale(price) {
        Err(error("price_scale", "Price must have at most 2 decimal places"))
    } else {
        Ok(())
    }
}

/// Validates an order line price: like [`validate_price`] but strictly positive.
pub fn validate_line_price(price: &Decimal) -> Result<(), ValidationError> {
    validate_positive_amount(price)?;
    validate_price(price)
}

/// Validates an order total: positive, at most [`MAX_ORDER_TOTAL`], two decimals.
pub fn validate_order_total(total: &Decimal) -> Result<(), ValidationError> {
    validate_positive_amount(total)?;
    if *total > Decimal::from(MAX_ORDER_TOTAL) {
        Err(error("total_range", "Order total must not exceed 10000000"))
    } else if !has_money_scale(total) {
        Err(error("total_scale", "Order total must have at most 2 decimal places"))
    } else {
        Ok(())
    }
}

/// Validates that a monetary amount is strictly positive.
pub fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(error("amount_positive", "Amount must be greater than 0"))
    }
}

/// Validates every tag against [`MAX_TAG_LENGTH`] and rejects empty tags.
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags
        .iter()
        .all(|t| !t.trim().is_empty() && t.chars().count() <= MAX_TAG_LENGTH)
    {
        Ok(())
    } else {
        Err(error(
            "tag_length",
            "Each tag must be between 1 and 30 characters",
        ))
    }
}

/// Rejects strings that are empty after trimming whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "Value must not be blank"))
    } else {
        Ok(())
    }
}
