//! User account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::role::Role;

/// Represents a user account together with its resolved role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)] // Never serialize password hash to API responses
    pub password_hash: String,
    pub is_active: bool,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            role: user.role.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Data needed to insert a new, not yet activated account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_name: String,
    pub is_active: bool,
}

/// Request payload for registration. New accounts always get the `user` role.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Username must be 1-255 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[validate(length(min = 8, max = 255, message = "Password must be 8-255 characters"))]
    pub password: String,
}

/// Response payload for registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    /// Plain activation token, also delivered by email.
    pub token: String,
}

/// Request payload for login.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: String,

    #[validate(length(min = 8, max = 255, message = "Password must be 8-255 characters"))]
    pub password: String,
}

/// Request payload for `PATCH /users/me`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Username must be 1-255 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::{SafeEmail, Username};
    use fake::Fake;

    fn sample_user() -> User {
        User {
            id: 7,
            username: Username().fake(),
            email: SafeEmail().fake(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            is_active: true,
            role: Role {
                id: 3,
                name: "user".to_string(),
                description: "Regular user".to_string(),
                level: 20,
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn test_response_carries_role_name() {
        let user = sample_user();
        let email = user.email.clone();
        let response = UserResponse::from(user);
        assert_eq!(response.role, "user");
        assert_eq!(response.email, email);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn test_register_request_validation() {
        let valid: RegisterRequest = serde_json::from_str(
            r#"{"username":"ana","email":"a@x.com","password":"secret12"}"#,
        )
        .unwrap();
        assert!(valid.validate().is_ok());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid.clone()
        };
        assert!(short_password.validate().is_err());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let long_name = RegisterRequest {
            username: "a".repeat(256),
            ..valid
        };
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_role_field() {
        let result: Result<RegisterRequest, _> = serde_json::from_str(
            r#"{"username":"ana","email":"a@x.com","password":"secret12","role":"admin"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_update_user_rejects_blank_username() {
        let request = UpdateUserRequest {
            username: "   ".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
