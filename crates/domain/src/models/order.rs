//! Order domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Lifecycle status of an order. New orders start as `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
    Failed,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
            OrderStatus::Failed => "failed",
            OrderStatus::Refunded => "refunded",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "returned" => Ok(OrderStatus::Returned),
            "failed" => Ok(OrderStatus::Failed),
            "refunded" => Ok(OrderStatus::Refunded),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accepted payment methods. The wire names are fixed by existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "cash_on_delivery")]
    CashOnDelivery,
    #[serde(rename = "Bkash")]
    Bkash,
    #[serde(rename = "credit_card")]
    CreditCard,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
            PaymentMethod::Bkash => "Bkash",
            PaymentMethod::CreditCard => "credit_card",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash_on_delivery" => Ok(PaymentMethod::CashOnDelivery),
            "Bkash" => Ok(PaymentMethod::Bkash),
            "credit_card" => Ok(PaymentMethod::CreditCard),
            _ => Err(format!("Invalid payment method: {}", s)),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An order header together with its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub shipping_address: String,
    pub placed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "order_items")]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    /// `None` once the book has been removed from the catalog.
    pub book_id: Option<i64>,
    pub quantity: i32,
    pub price: Decimal,
}

/// Largest quantity of one book in a single order line.
pub const MAX_LINE_QUANTITY: i32 = 10_000;

/// One requested line of a new order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct OrderItemRequest {
    #[validate(range(min = 1, message = "book_id must be positive"))]
    pub book_id: i64,

    #[validate(range(min = 1, max = 10000, message = "Quantity must be between 1 and 10000"))]
    pub quantity: i32,

    #[validate(custom(function = "shared::validation::validate_line_price"))]
    pub price: Decimal,
}

/// Request payload for `POST /orders`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateOrderRequest {
    #[validate(custom(function = "shared::validation::validate_order_total"))]
    pub total_amount: Decimal,

    pub payment_method: PaymentMethod,

    #[validate(length(min = 5, message = "Shipping address must be at least 5 characters"))]
    pub shipping_address: String,

    #[validate(length(min = 1, message = "An order needs at least one item"))]
    #[validate(nested)]
    #[serde(rename = "order_items")]
    pub items: Vec<OrderItemRequest>,
}

impl CreateOrderRequest {
    /// Σ(price × quantity) over the requested items, or `None` on overflow.
    pub fn computed_total(&self) -> Option<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            item.price
                .checked_mul(Decimal::from(item.quantity))
                .and_then(|line| total.checked_add(line))
        })
    }

}

/// Request payload for `PATCH /orders/:order_id`. Owners may only move the delivery address.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateOrderRequest {
    #[validate(length(min = 5, message = "Shipping address must be at least 5 characters"))]
    pub shipping_address: String,
}

/// Request payload for `PATCH /admin/orders/:order_id`. Absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AdminUpdateOrderRequest {
    #[validate(length(min = 5, message = "Shipping address must be at least 5 characters"))]
    pub shipping_address: Option<String>,

    pub payment_method: Option<PaymentMethod>,

    pub status: Option<OrderStatus>,
}

impl AdminUpdateOrderRequest {
    pub fn is_empty(&self) -> bool {
        self.shipping_address.is_none() && self.payment_method.is_none() && self.status.is_none()
    }
}
