//! Role repository.

use sqlx::PgPool;

use domain::models::{Role, RoleTable};

use crate::entities::RoleEntity;
use crate::error::StoreError;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<RoleEntity>, StoreError> {
        let timer = QueryTimer::new("find_all_roles");
        let result = sqlx::query_as::<_, RoleEntity>(
            "SELECT id, name, description, level FROM roles ORDER BY level",
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    /// Load the precedence table used by the role gates.
    pub async fn load_table(&self) -> Result<RoleTable, StoreError> {
        let roles = self.find_all().await?;
        Ok(roles.into_iter().map(Role::from).collect())
    }
}
