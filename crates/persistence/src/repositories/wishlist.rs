//! Wishlist repository.

use sqlx::PgPool;

use crate::entities::{BookEntity, WishlistEntity};
use crate::error::StoreError;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct WishlistRepository {
    pool: PgPool,
}

impl WishlistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Books on the user's wishlist, most recently added first.
    pub async fn find_books(&self, user_id: i64) -> Result<Vec<BookEntity>, StoreError> {
        let timer = QueryTimer::new("find_wishlist_books");
        let result = sqlx::query_as::<_, BookEntity>(
            r#"
            SELECT b.id, b.title, b.author, b.isbn, b.price, b.tags, b.description,
                   b.cover_image_url, b.pages, b.stock, b.created_at, b.updated_at, b.version
            FROM wishlists w
            JOIN books b ON b.id = w.book_id
            WHERE w.user_id = $1
            ORDER BY w.created_at DESC, w.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    /// Add a book; adding it twice returns the existing entry.
    pub async fn add(&self, user_id: i64, book_id: i64) -> Result<WishlistEntity, StoreError> {
        let timer = QueryTimer::new("add_wishlist_entry");
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO wishlists (user_id, book_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, book_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        let entry = sqlx::query_as::<_, WishlistEntity>(
            r#"
            SELECT id, user_id, book_id, created_at, updated_at
            FROM wishlists
            WHERE user_id = $1 AND book_id = $2
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(entry)
    }

    /// Remove a book. Removing a book that is not on the list is not an error.
    pub async fn remove(&self, user_id: i64, book_id: i64) -> Result<(), StoreError> {
        let timer = QueryTimer::new("remove_wishlist_entry");
        sqlx::query("DELETE FROM wishlists WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(())
    }
}
