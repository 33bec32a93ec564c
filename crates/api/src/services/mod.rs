//! Business workflows spanning several repositories.

pub mod admin_bootstrap;
pub mod auth;
pub mod email;
pub mod password_reset;

pub use auth::{AuthError, AuthService};
pub use email::{EmailError, EmailService};
pub use password_reset::{PasswordResetError, PasswordResetService};
