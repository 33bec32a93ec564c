//! Domain services for the bookstore.

pub mod notification;

pub use notification::{MailError, MailKind, Mailer, MockMailer, SentMail};
