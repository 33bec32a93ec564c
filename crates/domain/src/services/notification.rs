//! Account notification seam.
//!
//! Registration and password reset hand a one-time token to the account
//! owner by email. Delivery is abstracted behind [`Mailer`] so the workflows
//! can be exercised without a real provider.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Error type for mail delivery.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),

    #[error("Mail configuration error: {0}")]
    Configuration(String),
}

/// Kind of account email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailKind {
    Invitation,
    PasswordReset,
}

/// Sends account emails carrying plain one-time tokens.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    /// Send the activation link to a freshly registered user.
    async fn send_invitation(&self, username: &str, email: &str, token: &str)
        -> Result<(), MailError>;

    /// Send the password reset link.
    async fn send_password_reset(
        &self,
        username: &str,
        email: &str,
        token: &str,
    ) -> Result<(), MailError>;
}

/// A message captured by [`MockMailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub kind: MailKind,
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Mock mailer for development and testing.
///
/// Records every message instead of sending it. Clones share the outbox.
#[derive(Debug, Clone, Default)]
pub struct MockMailer {
    /// Whether to simulate failures for testing.
    pub simulate_failure: bool,
    outbox: Arc<Mutex<Vec<SentMail>>>,
}

impl MockMailer {
    /// Create a new mock mailer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock mailer whose every delivery fails.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// All messages recorded so far, oldest first.
    pub async fn sent(&self) -> Vec<SentMail> {
        self.outbox.lock().await.clone()
    }

    /// Plain token of the most recent message of `kind` sent to `email`.
    pub async fn last_token_for(&self, email: &str, kind: MailKind) -> Option<String> {
        self.outbox
            .lock()
            .await
            .iter()
            .rev()
            .find(|m| m.kind == kind && m.email == email)
            .map(|m| m.token.clone())
    }

    async fn record(
        &self,
        kind: MailKind,
        username: &str,
        email: &str,
        token: &str,
    ) -> Result<(), MailError> {
        if self.simulate_failure {
            tracing::warn!(
                email = %email,
                kind = ?kind,
                "Mock mailer simulating failure"
            );
            return Err(MailError::Delivery("Simulated failure".to_string()));
        }

        tracing::info!(email = %email, kind = ?kind, "Mock: Would send email");

        self.outbox.lock().await.push(SentMail {
            kind,
            username: username.to_string(),
            email: email.to_string(),
            token: token.to_string(),
        });

        Ok(())
    }
}

#[async_trait::async_trait]
impl Mailer for MockMailer {
    async fn send_invitation(
        &self,
        username: &str,
        email: &str,
        token: &str,
    ) -> Result<(), MailError> {
        self.record(MailKind::Invitation, username, email, token)
            .await
    }

    async fn send_password_reset(
        &self,
        username: &str,
        email: &str,
        token: &str,
    ) -> Result<(), MailError> {
        self.record(MailKind::PasswordReset, username, email, token)
            .await
    }
}
