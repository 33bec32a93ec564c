//! Role entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the roles table.
#[derive(Debug, Clone, FromRow)]
pub struct RoleEntity {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub level: i32,
}

impl From<RoleEntity> for domain::models::Role {
    fn from(entity: RoleEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            level: entity.level,
        }
    }
}
