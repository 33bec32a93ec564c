//! Review repository.

use sqlx::PgPool;

use domain::models::review::{CreateReviewRequest, UpdateReviewRequest};

use crate::entities::ReviewEntity;
use crate::error::StoreError;
use crate::metrics::QueryTimer;

/// Repository for book reviews. Changes are scoped to the author and the book.
#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_book(&self, book_id: i64) -> Result<Vec<ReviewEntity>, StoreError> {
        let timer = QueryTimer::new("find_reviews_by_book");
        let result = sqlx::query_as::<_, ReviewEntity>(
            r#"
            SELECT id, user_id, book_id, rating, content, created_at, updated_at
            FROM reviews
            WHERE book_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    /// Unknown books fail with `NotFound`.
    pub async fn create(
        &self,
        user_id: i64,
        book_id: i64,
        review: &CreateReviewRequest,
    ) -> Result<ReviewEntity, StoreError> {
        let timer = QueryTimer::new("create_review");
        let result = sqlx::query_as::<_, ReviewEntity>(
            r#"
            INSERT INTO reviews (user_id, book_id, rating, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, book_id, rating, content, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(review.rating)
        .bind(&review.content)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    pub async fn update(
        &self,
        review_id: i64,
        user_id: i64,
        book_id: i64,
        changes: &UpdateReviewRequest,
    ) -> Result<ReviewEntity, StoreError> {
        let timer = QueryTimer::new("update_review");
        let result = sqlx::query_as::<_, ReviewEntity>(
            r#"
            UPDATE reviews
            SET content = COALESCE($1, content),
                rating = COALESCE($2, rating),
                updated_at = NOW()
            WHERE id = $3 AND user_id = $4 AND book_id = $5
            RETURNING id, user_id, book_id, rating, content, created_at, updated_at
            "#,
        )
        .bind(&changes.content)
        .bind(changes.rating)
        .bind(review_id)
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result?.ok_or(StoreError::NotFound)
    }

    pub async fn delete(
        &self,
        review_id: i64,
        user_id: i64,
        book_id: i64,
    ) -> Result<(), StoreError> {
        let timer = QueryTimer::new("delete_review");
        let result = sqlx::query(
            "DELETE FROM reviews WHERE id = $1 AND user_id = $2 AND book_id = $3",
        )
        .bind(review_id)
        .bind(user_id)
        .bind(book_id)
        .execute(&self.pool)
        .await?;
        timer.record();

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
