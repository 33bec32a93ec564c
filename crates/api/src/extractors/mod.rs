//! Custom Axum extractors.
//!
//! Every rejection is turned into an [`ApiError`](crate::error::ApiError) so
//! malformed input gets the same `{"error": ...}` envelope as handler errors.

pub mod request;
pub mod user_auth;

pub use request::{ApiPath, ApiQuery, MultiQuery, ValidatedJson};
pub use user_auth::CurrentUser;
