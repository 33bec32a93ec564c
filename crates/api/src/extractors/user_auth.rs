//! Authenticated caller extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::User;

use crate::error::ApiError;

/// The user resolved from the bearer token, with its role.
///
/// Inserted by [`require_user_auth`](crate::middleware::require_user_auth);
/// handlers take it as an explicit argument.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("authentication required".to_string()))
    }
}
