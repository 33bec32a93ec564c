//! Role gates.
//!
//! Run after [`require_user_auth`](super::user_auth::require_user_auth), which
//! puts the [`CurrentUser`] into the request extensions.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use domain::models::role::{RoleTable, MODERATOR_ROLE};
use domain::models::User;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Check the caller's level against the level of `required`.
pub fn check_precedence(roles: &RoleTable, required: &str, caller: &User) -> Result<(), ApiError> {
    match roles.permits(required, caller.role.level) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ApiError::Forbidden(format!(
            "requires the {} role or higher",
            required
        ))),
        Err(unknown) => Err(ApiError::Internal(unknown.to_string())),
    }
}

/// Admin routes only look at the role name, never at levels.
pub fn check_admin(caller: &User) -> Result<(), ApiError> {
    if caller.role.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden("admin access required".to_string()))
    }
}

fn current_user(req: &Request<Body>) -> Result<&User, ApiError> {
    req.extensions()
        .get::<CurrentUser>()
        .map(|current| &current.0)
        .ok_or_else(|| {
            tracing::warn!("Role gate reached without an authenticated user");
            ApiError::Unauthorized("authentication required".to_string())
        })
}

async fn require_role(state: AppState, required: &str, req: Request<Body>, next: Next) -> Response {
    let checked = current_user(&req).and_then(|user| check_precedence(&state.roles, required, user));
    match checked {
        Ok(()) => next.run(req).await,
        Err(err) => err.into_response(),
    }
}

/// Requires the `moderator` level or a more privileged one.
pub async fn require_moderator(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    require_role(state, MODERATOR_ROLE, req, next).await
}

/// Requires the `admin` role.
pub async fn require_admin(req: Request<Body>, next: Next) -> Response {
    match current_user(&req).and_then(check_admin) {
        Ok(()) => next.run(req).await,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;
    use domain::models::Role;

    fn role(id: i64, name: &str, level: i32) -> Role {
        Role {
            id,
            name: name.to_string(),
            description: String::new(),
            level,
        }
    }

    fn table() -> RoleTable {
        RoleTable::new(vec![
            role(1, "admin", 0),
            role(2, "moderator", 10),
            role(3, "user", 20),
        ])
    }

    fn user_with(role: Role) -> User {
        User {
            id: 1,
            username: "reader".to_string(),
            email: "reader@example.com".to_string(),
            password_hash: String::new(),
            is_active: true,
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_moderator_gate() {
        let roles = table();
        assert!(check_precedence(&roles, "moderator", &user_with(role(1, "admin", 0))).is_ok());
        assert!(
            check_precedence(&roles, "moderator", &user_with(role(2, "moderator", 10))).is_ok()
        );

        let err = check_precedence(&roles, "moderator", &user_with(role(3, "user", 20)))
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_unknown_required_role_is_internal() {
        let err = check_precedence(&table(), "editor", &user_with(role(1, "admin", 0)))
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_admin_gate_uses_name_only() {
        assert!(check_admin(&user_with(role(1, "admin", 0))).is_ok());
        assert!(check_admin(&user_with(role(2, "moderator", 0))).is_err());
    }
}
