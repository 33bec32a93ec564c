//! Role reference data and the precedence table.
//!
//! Roles are seeded by migration and never change at runtime. A lower level
//! means more privilege: `admin` (0) outranks `moderator` (10), which outranks
//! `user` (20).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub const ADMIN_ROLE: &str = "admin";
pub const MODERATOR_ROLE: &str = "moderator";
pub const USER_ROLE: &str = "user";

/// A role as stored in the `roles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub level: i32,
}

impl Role {
    /// Returns true if this is the admin role.
    pub fn is_admin(&self) -> bool {
        self.name == ADMIN_ROLE
    }
}

/// Raised when a gate asks for a role that was never seeded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Returns true when a caller at `caller_level` may act where `required_level` is needed.
pub fn has_precedence(caller_level: i32, required_level: i32) -> bool {
    caller_level <= required_level
}

/// Immutable name → level map, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    levels: HashMap<String, i32>,
}

impl RoleTable {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        roles.into_iter().collect()
    }

    pub fn level_of(&self, name: &str) -> Option<i32> {
        self.levels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Checks whether a caller at `caller_level` satisfies the `required` role.
    pub fn permits(&self, required: &str, caller_level: i32) -> Result<bool, UnknownRole> {
        let required_level = self
            .level_of(required)
            .ok_or_else(|| UnknownRole(required.to_string()))?;

        Ok(has_precedence(caller_level, required_level))
    }
}

impl FromIterator<Role> for RoleTable {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().map(|r| (r.name, r.level)).collect(),
        }
    }
}
