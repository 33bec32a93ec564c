//! Email delivery for account activation and password reset.
//!
//! Providers:
//! - `console`: logs the message (development)
//! - `sendgrid`: SendGrid v3 HTTP API
//!
//! A disabled service accepts every message and sends nothing.

use async_trait::async_trait;
use domain::services::{MailError, Mailer};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::EmailConfig;

const SENDGRID_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Unknown email provider: {0}")]
    UnknownProvider(String),

    #[error("Email provider not configured: {0}")]
    NotConfigured(String),

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

impl From<EmailError> for MailError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::UnknownProvider(_) | EmailError::NotConfigured(_) => {
                MailError::Configuration(err.to_string())
            }
            EmailError::SendFailed(_) | EmailError::ProviderError(_) => {
                MailError::Delivery(err.to_string())
            }
        }
    }
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub to_name: String,
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
}

/// Transactional email sender backed by the configured provider.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
    client: reqwest::Client,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
            client: reqwest::Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Link the frontend opens to activate an account.
    pub fn activation_url(&self, token: &str) -> String {
        format!("{}/confirm/{}", self.frontend_url(), token)
    }

    /// Link the frontend opens to choose a new password.
    pub fn password_reset_url(&self, token: &str) -> String {
        format!("{}/reset-password?token={}", self.frontend_url(), token)
    }

    fn frontend_url(&self) -> &str {
        self.config.frontend_url.trim_end_matches('/')
    }

    pub fn invitation_message(&self, username: &str, email: &str, token: &str) -> EmailMessage {
        let url = self.activation_url(token);
        let hours = self.config.invitation_ttl_secs / 3600;

        EmailMessage {
            to: email.to_string(),
            to_name: username.to_string(),
            subject: "Activate your Bookstore account".to_string(),
            body_text: format!(
                "Hi {username},\n\n\
                 Thanks for signing up. Activate your account by opening the link below:\n\n\
                 {url}\n\n\
                 The link expires in {hours} hours.\n\n\
                 If you did not sign up, you can ignore this email.\n"
            ),
            body_html: format!(
                r#"<!DOCTYPE html>
<html>
<body style="font-family: Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Welcome to Bookstore</h2>
    <p>Hi {username},</p>
    <p>Thanks for signing up. Activate your account with the button below.</p>
    <p style="text-align: center; margin: 30px 0;">
        <a href="{url}" style="background: #2d6a4f; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px;">Activate account</a>
    </p>
    <p style="color: #666; font-size: 14px;">The link expires in {hours} hours.</p>
    <p style="color: #999; font-size: 12px;">Or paste this link into your browser:<br>{url}</p>
</body>
</html>"#
            ),
        }
    }

    pub fn password_reset_message(&self, username: &str, email: &str, token: &str) -> EmailMessage {
        let url = self.password_reset_url(token);
        let minutes = self.config.password_reset_ttl_secs / 60;

        EmailMessage {
            to: email.to_string(),
            to_name: username.to_string(),
            subject: "Reset your Bookstore password".to_string(),
            body_text: format!(
                "Hi {username},\n\n\
                 We received a request to reset your password. Choose a new one here:\n\n\
                 {url}\n\n\
                 The link expires in {minutes} minutes.\n\n\
                 If you did not ask for this, your password stays unchanged.\n"
            ),
            body_html: format!(
                r#"<!DOCTYPE html>
<html>
<body style="font-family: Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Reset your password</h2>
    <p>Hi {username},</p>
    <p>We received a request to reset your password.</p>
    <p style="text-align: center; margin: 30px 0;">
        <a href="{url}" style="background: #2d6a4f; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px;">Reset password</a>
    </p>
    <p style="color: #666; font-size: 14px;">The link expires in {minutes} minutes.</p>
    <p style="color: #999; font-size: 12px;">If you did not ask for this, your password stays unchanged.</p>
</body>
</html>"#
            ),
        }
    }

    /// Send an email message through the configured provider.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(
                to = %message.to,
                subject = %message.subject,
                "Email service disabled, skipping send"
            );
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => {
                self.send_console(&message);
                Ok(())
            }
            "sendgrid" => self.send_sendgrid(&message).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(EmailError::UnknownProvider(provider.to_string()))
            }
        }
    }

    fn send_console(&self, message: &EmailMessage) {
        info!(
            to = %message.to,
            subject = %message.subject,
            from = %self.config.sender_email,
            "Email (console provider)"
        );
        info!(body_text = %message.body_text, "Email body");
    }

    fn sendgrid_payload(&self, message: &EmailMessage) -> serde_json::Value {
        serde_json::json!({
            "personalizations": [{
                "to": [{ "email": message.to, "name": message.to_name }]
            }],
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name
            },
            "subject": message.subject,
            "content": [
                { "type": "text/plain", "value": message.body_text },
                { "type": "text/html", "value": message.body_html }
            ]
        })
    }

    async fn send_sendgrid(&self, message: &EmailMessage) -> Result<(), EmailError> {
        if self.config.sendgrid_api_key.is_empty() {
            return Err(EmailError::NotConfigured("sendgrid_api_key".to_string()));
        }

        let response = self
            .client
            .post(SENDGRID_URL)
            .bearer_auth(&self.config.sendgrid_api_key)
            .json(&self.sendgrid_payload(message))
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(format!("SendGrid request failed: {}", e)))?;

        if response.status().is_success() {
            info!(to = %message.to, subject = %message.subject, "Email sent via SendGrid");
            return Ok(());
        }

        let status = response.status();
        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, error = %error_body, "SendGrid API error");
        Err(EmailError::ProviderError(format!(
            "SendGrid returned {}: {}",
            status, error_body
        )))
    }
}

#[async_trait]
impl Mailer for EmailService {
    async fn send_invitation(&self, username: &str, email: &str, token: &str) -> Result<(), MailError> {
        let message = self.invitation_message(username, email, token);
        Ok(self.send(message).await?)
    }

    async fn send_password_reset(
        &self,
        username: &str,
        email: &str,
        token: &str,
    ) -> Result<(), MailError> {
        let message = self.password_reset_message(username, email, token);
        Ok(self.send(message).await?)
    }
}
