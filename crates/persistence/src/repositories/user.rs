//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use domain::models::user::NewUser;

use crate::entities::UserEntity;
use crate::error::StoreError;
use crate::metrics::QueryTimer;

const USER_COLUMNS: &str = r#"
    u.id, u.username, u.email, u.password_hash, u.is_active,
    r.id AS role_id, r.name AS role_name, r.description AS role_description, r.level AS role_level,
    u.created_at, u.updated_at
"#;

/// Repository for user accounts and their activation invitations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_user(
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<UserEntity, StoreError> {
        let sql = format!(
            r#"
            WITH inserted AS (
                INSERT INTO users (username, email, password_hash, is_active, role_id)
                SELECT $1, $2, $3, $4, id FROM roles WHERE name = $5
                RETURNING *
            )
            SELECT {} FROM inserted u JOIN roles r ON r.id = u.role_id
            "#,
            USER_COLUMNS
        );

        sqlx::query_as::<_, UserEntity>(&sql)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(&user.role_name)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Insert a user without an invitation.
    pub async fn create(&self, user: &NewUser) -> Result<UserEntity, StoreError> {
        let timer = QueryTimer::new("create_user");
        let mut tx = self.pool.begin().await?;
        let entity = Self::insert_user(&mut tx, user).await?;
        tx.commit().await?;
        timer.record();
        Ok(entity)
    }

    /// Insert a user and its activation invitation in one transaction.
    ///
    /// `invitation_hash` is the SHA-256 digest of the token sent to the user.
    pub async fn create_and_invite(
        &self,
        user: &NewUser,
        invitation_hash: &str,
        expiry: DateTime<Utc>,
    ) -> Result<UserEntity, StoreError> {
        let timer = QueryTimer::new("create_user_and_invite");
        let mut tx = self.pool.begin().await?;

        let entity = Self::insert_user(&mut tx, user).await?;

        sqlx::query(
            r#"
            INSERT INTO user_invitations (token, user_id, expiry)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(invitation_hash)
        .bind(entity.id)
        .bind(expiry)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(entity)
    }

    /// Activate the user owning an unexpired invitation and drop their invitations.
    ///
    /// Returns the activated user's ID, or `NotFound` if the token is unknown or expired.
    pub async fn activate(&self, invitation_hash: &str) -> Result<i64, StoreError> {
        let timer = QueryTimer::new("activate_user");
        let mut tx = self.pool.begin().await?;

        let user_id: i64 = sqlx::query_scalar(
            r#"
            SELECT user_id
            FROM user_invitations
            WHERE token = $1 AND expiry > NOW()
            FOR UPDATE
            "#,
        )
        .bind(invitation_hash)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        sqlx::query("UPDATE users SET is_active = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM user_invitations WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(user_id)
    }

    /// Delete a user together with any pending invitations.
    pub async fn delete(&self, user_id: i64) -> Result<(), StoreError> {
        let timer = QueryTimer::new("delete_user");
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM user_invitations WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();
        Ok(())
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, StoreError> {
        let timer = QueryTimer::new("find_user_by_id");
        let sql = format!(
            "SELECT {} FROM users u JOIN roles r ON r.id = u.role_id WHERE u.id = $1",
            USER_COLUMNS
        );
        let result = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?)
    }

    /// Find a user by email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, StoreError> {
        let timer = QueryTimer::new("find_user_by_email");
        let sql = format!(
            "SELECT {} FROM users u JOIN roles r ON r.id = u.role_id WHERE u.email = $1",
            USER_COLUMNS
        );
        let result = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?)
    }

    /// Change a user's username.
    pub async fn update_username(
        &self,
        user_id: i64,
        username: &str,
    ) -> Result<UserEntity, StoreError> {
        let timer = QueryTimer::new("update_username");
        let sql = format!(
            r#"
            UPDATE users u
            SET username = $1, updated_at = NOW()
            FROM roles r
            WHERE u.id = $2 AND r.id = u.role_id
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let result = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(username)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result?.ok_or(StoreError::NotFound)
    }
}
