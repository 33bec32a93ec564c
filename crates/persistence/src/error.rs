//! Repository error type.

use thiserror::Error;

/// Unique constraint on `users.email`.
pub const USERS_EMAIL_KEY: &str = "users_email_key";
/// Unique constraint on `users.username`.
pub const USERS_USERNAME_KEY: &str = "users_username_key";

const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("duplicate email")]
    DuplicateEmail,

    #[error("duplicate username")]
    DuplicateUsername,

    #[error("Record was modified by another request")]
    VersionConflict,

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => return StoreError::NotFound,
            sqlx::Error::Database(db_err) => {
                match db_err.constraint() {
                    Some(USERS_EMAIL_KEY) => return StoreError::DuplicateEmail,
                    Some(USERS_USERNAME_KEY) => return StoreError::DuplicateUsername,
                    _ => {}
                }
                // A dangling reference means the referenced row does not exist
                if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
                    return StoreError::NotFound;
                }
            }
            _ => {}
        }
        StoreError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::NotFound
        ));
    }

    #[test]
    fn test_other_errors_are_wrapped() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Database(sqlx::Error::PoolTimedOut)
        ));
    }

    #[test]
    fn test_duplicate_messages() {
        assert_eq!(StoreError::DuplicateEmail.to_string(), "duplicate email");
        assert_eq!(StoreError::DuplicateUsername.to_string(), "duplicate username");
    }
}
