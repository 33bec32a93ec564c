//! Password change request repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::PasswordChangeRequestEntity;
use crate::error::StoreError;
use crate::metrics::QueryTimer;

/// Repository for password reset tokens.
#[derive(Clone)]
pub struct PasswordRequestRepository {
    pool: PgPool,
}

impl PasswordRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new request for `user_id`. `token_hash` is the digest of the emailed token.
    pub async fn create(
        &self,
        user_id: i64,
        token_hash: &str,
        expiry: DateTime<Utc>,
    ) -> Result<PasswordChangeRequestEntity, StoreError> {
        let timer = QueryTimer::new("create_password_request");
        let result = sqlx::query_as::<_, PasswordChangeRequestEntity>(
            r#"
            INSERT INTO password_change_requests (token, user_id, expiry)
            VALUES ($1, $2, $3)
            RETURNING id, token, user_id, expiry, used, created_at
            "#,
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(expiry)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    pub async fn find_by_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<PasswordChangeRequestEntity>, StoreError> {
        let timer = QueryTimer::new("find_password_request_by_token");
        let result = sqlx::query_as::<_, PasswordChangeRequestEntity>(
            r#"
            SELECT id, token, user_id, expiry, used, created_at
            FROM password_change_requests
            WHERE token = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    /// Remove a request whose email could not be delivered.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let timer = QueryTimer::new("delete_password_request");
        sqlx::query("DELETE FROM password_change_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(())
    }

    /// Mark the request used and store the new password hash in one transaction.
    ///
    /// Returns `false` without changing anything if the request was already used
    /// or has expired.
    pub async fn consume(
        &self,
        request_id: i64,
        user_id: i64,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("consume_password_request");
        let mut tx = self.pool.begin().await?;

        let marked = sqlx::query(
            r#"
            UPDATE password_change_requests
            SET used = TRUE
            WHERE id = $1 AND used = FALSE AND expiry > NOW()
            "#,
        )
        .bind(request_id)
        .execute(&mut *tx)
        .await?;

        if marked.rows_affected() == 0 {
            return Ok(false);
        }

        let updated = sqlx::query(
            "UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(password_hash)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tracing::error!(request_id, user_id, "Password reset for a user that no longer exists");
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;
        timer.record();
        Ok(true)
    }
}
