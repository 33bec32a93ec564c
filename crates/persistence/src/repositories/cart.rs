//! Shopping cart repository.

use sqlx::PgPool;

use crate::entities::{CartEntity, CartItemEntity, CartItemWithBookEntity};
use crate::error::StoreError;
use crate::metrics::QueryTimer;

/// Repository for carts and their items. Every item operation is scoped to the owning user.
#[derive(Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return the user's cart, creating it on first use.
    ///
    /// Single statement, so concurrent first calls converge on one cart.
    pub async fn get_or_create(&self, user_id: i64) -> Result<CartEntity, StoreError> {
        let timer = QueryTimer::new("get_or_create_cart");
        let result = sqlx::query_as::<_, CartEntity>(
            r#"
            INSERT INTO carts (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET updated_at = carts.updated_at
            RETURNING id, user_id, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    /// Add `quantity` of a book, summing with any existing line for the same book.
    pub async fn add_item(
        &self,
        cart_id: i64,
        book_id: i64,
        quantity: i32,
    ) -> Result<CartItemEntity, StoreError> {
        let timer = QueryTimer::new("add_cart_item");
        let result = sqlx::query_as::<_, CartItemEntity>(
            r#"
            INSERT INTO cart_items (cart_id, book_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, book_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                          updated_at = NOW()
            RETURNING id, cart_id, book_id, quantity, created_at, updated_at
            "#,
        )
        .bind(cart_id)
        .bind(book_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    /// Items of the user's cart with their book details, oldest first.
    pub async fn find_items(
        &self,
        cart_id: i64,
    ) -> Result<Vec<CartItemWithBookEntity>, StoreError> {
        let timer = QueryTimer::new("find_cart_items");
        let result = sqlx::query_as::<_, CartItemWithBookEntity>(
            r#"
            SELECT ci.id, ci.cart_id, ci.book_id, ci.quantity, ci.created_at, ci.updated_at,
                   b.title, b.author, b.price, b.cover_image_url, b.stock
            FROM cart_items ci
            JOIN books b ON b.id = ci.book_id
            WHERE ci.cart_id = $1
            ORDER BY ci.created_at, ci.id
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    /// Replace the quantity of an item in the user's cart.
    pub async fn update_quantity(
        &self,
        item_id: i64,
        user_id: i64,
        quantity: i32,
    ) -> Result<CartItemEntity, StoreError> {
        let timer = QueryTimer::new("update_cart_item_quantity");
        let result = sqlx::query_as::<_, CartItemEntity>(
            r#"
            UPDATE cart_items ci
            SET quantity = $1, updated_at = NOW()
            FROM carts c
            WHERE ci.id = $2 AND ci.cart_id = c.id AND c.user_id = $3
            RETURNING ci.id, ci.cart_id, ci.book_id, ci.quantity, ci.created_at, ci.updated_at
            "#,
        )
        .bind(quantity)
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result?.ok_or(StoreError::NotFound)
    }

    /// Remove an item from the user's cart. Removing a missing item is not an error.
    pub async fn delete_item(&self, item_id: i64, user_id: i64) -> Result<(), StoreError> {
        let timer = QueryTimer::new("delete_cart_item");
        sqlx::query(
            r#"
            DELETE FROM cart_items ci
            USING carts c
            WHERE ci.id = $1 AND ci.cart_id = c.id AND c.user_id = $2
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }

    /// Delete the user's cart and, by cascade, its items.
    pub async fn delete_cart(&self, user_id: i64) -> Result<(), StoreError> {
        let timer = QueryTimer::new("delete_cart");
        sqlx::query("DELETE FROM carts WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(())
    }
}
