//! Domain layer for the bookstore backend.
//!
//! This crate contains:
//! - Domain models (User, Role, Book, Cart, Order, Review, Wishlist)
//! - The role precedence table
//! - The notification (mailer) seam used by the account workflows

pub mod models;
pub mod services;
