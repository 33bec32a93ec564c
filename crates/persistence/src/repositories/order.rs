//! Order repository.

use sqlx::PgPool;

use domain::models::order::{AdminUpdateOrderRequest, CreateOrderRequest};
use domain::models::{Order, OrderItem, OrderStatus};

use crate::entities::order::assemble_orders;
use crate::entities::{OrderEntity, OrderItemEntity, OrderRowEntity};
use crate::error::StoreError;
use crate::metrics::QueryTimer;

const ORDER_COLUMNS: &str =
    "id, user_id, total_amount, status, payment_method, shipping_address, placed_at, updated_at";

const ORDER_WITH_ITEMS: &str = r#"
    SELECT o.id, o.user_id, o.total_amount, o.status, o.payment_method, o.shipping_address,
           o.placed_at, o.updated_at,
           oi.id AS item_id, oi.book_id AS item_book_id,
           oi.quantity AS item_quantity, oi.price AS item_price
    FROM orders o
    LEFT JOIN order_items oi ON oi.order_id = o.id
"#;

/// Repository for orders and their line items.
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the order header and every item in one transaction.
    ///
    /// An item referencing an unknown book fails with `NotFound` and nothing is kept.
    pub async fn create(
        &self,
        user_id: i64,
        order: &CreateOrderRequest,
    ) -> Result<Order, StoreError> {
        let timer = QueryTimer::new("create_order");
        let mut tx = self.pool.begin().await?;

        let header_sql = format!(
            r#"
            INSERT INTO orders (user_id, total_amount, status, payment_method, shipping_address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        );
        let header = sqlx::query_as::<_, OrderEntity>(&header_sql)
            .bind(user_id)
            .bind(order.total_amount)
            .bind(OrderStatus::Pending.as_str())
            .bind(order.payment_method.as_str())
            .bind(&order.shipping_address)
            .fetch_one(&mut *tx)
            .await?;

        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let entity = sqlx::query_as::<_, OrderItemEntity>(
                r#"
                INSERT INTO order_items (order_id, book_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                RETURNING id, order_id, book_id, quantity, price
                "#,
            )
            .bind(header.id)
            .bind(item.book_id)
            .bind(item.quantity)
            .bind(item.price)
            .fetch_one(&mut *tx)
            .await?;
            items.push(OrderItem::from(entity));
        }

        tx.commit().await?;
        timer.record();
        Ok(header.into_order(items))
    }

    /// All orders of a user with their items, ordered by order ID.
    pub async fn find_by_user(&self, user_id: i64) -> Result<Vec<Order>, StoreError> {
        let timer = QueryTimer::new("find_orders_by_user");
        let sql = format!(
            "{} WHERE o.user_id = $1 ORDER BY o.id, oi.id",
            ORDER_WITH_ITEMS
        );
        let rows = sqlx::query_as::<_, OrderRowEntity>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        Ok(assemble_orders(rows?))
    }

    /// A single order, only if it belongs to `user_id`.
    pub async fn find_for_user(&self, order_id: i64, user_id: i64) -> Result<Order, StoreError> {
        let timer = QueryTimer::new("find_order_for_user");
        let sql = format!(
            "{} WHERE o.id = $1 AND o.user_id = $2 ORDER BY oi.id",
            ORDER_WITH_ITEMS
        );
        let rows = sqlx::query_as::<_, OrderRowEntity>(&sql)
            .bind(order_id)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        assemble_orders(rows?)
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound)
    }

    async fn find_items(&self, order_id: i64) -> Result<Vec<OrderItem>, StoreError> {
        let timer = QueryTimer::new("find_order_items");
        let result = sqlx::query_as::<_, OrderItemEntity>(
            r#"
            SELECT id, order_id, book_id, quantity, price
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(OrderItem::from).collect())
    }

    /// Change the shipping address of one of the user's own orders.
    pub async fn update_by_owner(
        &self,
        order_id: i64,
        user_id: i64,
        shipping_address: &str,
    ) -> Result<Order, StoreError> {
        let timer = QueryTimer::new("update_order_by_owner");
        let sql = format!(
            r#"
            UPDATE orders
            SET shipping_address = $1, updated_at = NOW()
            WHERE id = $2 AND user_id = $3
            RETURNING {}
            "#,
            ORDER_COLUMNS
        );
        let header = sqlx::query_as::<_, OrderEntity>(&sql)
            .bind(shipping_address)
            .bind(order_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)?;
        timer.record();

        let items = self.find_items(header.id).await?;
        Ok(header.into_order(items))
    }

    /// Update any order; fields left out of `changes` are kept.
    pub async fn update_by_admin(
        &self,
        order_id: i64,
        changes: &AdminUpdateOrderRequest,
    ) -> Result<Order, StoreError> {
        let timer = QueryTimer::new("update_order_by_admin");
        let sql = format!(
            r#"
            UPDATE orders
            SET shipping_address = COALESCE($1, shipping_address),
                payment_method = COALESCE($2, payment_method),
                status = COALESCE($3, status),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            ORDER_COLUMNS
        );
        let header = sqlx::query_as::<_, OrderEntity>(&sql)
            .bind(&changes.shipping_address)
            .bind(changes.payment_method.map(|m| m.as_str()))
            .bind(changes.status.map(|s| s.as_str()))
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)?;
        timer.record();

        let items = self.find_items(header.id).await?;
        Ok(header.into_order(items))
    }
}
