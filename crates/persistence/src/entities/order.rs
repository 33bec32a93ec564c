//! Order entities (database row mappings).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use std::str::FromStr;

use domain::models::{Order, OrderItem, OrderStatus, PaymentMethod};

/// Database row mapping for the orders table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderEntity {
    pub id: i64,
    pub user_id: i64,
    pub total_amount: Decimal,
    pub status: String,
    pub payment_method: String,
    pub shipping_address: String,
    pub placed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderEntity {
    /// Builds the domain order from this header and its items.
    pub fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: self.id,
            user_id: self.user_id,
            total_amount: self.total_amount,
            // CHECK constraints keep both columns within the enum values
            status: OrderStatus::from_str(&self.status).unwrap_or_default(),
            payment_method: PaymentMethod::from_str(&self.payment_method)
                .unwrap_or(PaymentMethod::CashOnDelivery),
            shipping_address: self.shipping_address,
            placed_at: self.placed_at,
            updated_at: self.updated_at,
            items,
        }
    }
}

/// Database row mapping for the order_items table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderItemEntity {
    pub id: i64,
    pub order_id: i64,
    pub book_id: Option<i64>,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<OrderItemEntity> for OrderItem {
    fn from(entity: OrderItemEntity) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            book_id: entity.book_id,
            quantity: entity.quantity,
            price: entity.price,
        }
    }
}

/// One row of `orders LEFT JOIN order_items`. Item columns are NULL for orders without items.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRowEntity {
    pub id: i64,
    pub user_id: i64,
    pub total_amount: Decimal,
    pub status: String,
    pub payment_method: String,
    pub shipping_address: String,
    pub placed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub item_id: Option<i64>,
    pub item_book_id: Option<i64>,
    pub item_quantity: Option<i32>,
    pub item_price: Option<Decimal>,
}

impl OrderRowEntity {
    fn split(self) -> (OrderEntity, Option<OrderItem>) {
        let item = match (self.item_id, self.item_quantity, self.item_price) {
            (Some(id), Some(quantity), Some(price)) => Some(OrderItem {
                id,
                order_id: self.id,
                book_id: self.item_book_id,
                quantity,
                price,
            }),
            _ => None,
        };

        let header = OrderEntity {
            id: self.id,
            user_id: self.user_id,
            total_amount: self.total_amount,
            status: self.status,
            payment_method: self.payment_method,
            shipping_address: self.shipping_address,
            placed_at: self.placed_at,
            updated_at: self.updated_at,
        };

        (header, item)
    }
}

/// Folds joined rows into orders, one per distinct order ID.
///
/// Rows must arrive ordered by order ID, then item ID; that order is preserved.
pub fn assemble_orders(rows: Vec<OrderRowEntity>) -> Vec<Order> {
    let mut orders: Vec<Order> = Vec::new();

    for row in rows {
        let (header, item) = row.split();
        match orders.last_mut() {
            Some(current) if current.id == header.id => current.items.extend(item),
            _ => orders.push(header.into_order(item.into_iter().collect())),
        }
    }

    orders
}
