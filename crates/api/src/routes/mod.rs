//! HTTP route handlers.

pub mod admin;
pub mod auth;
pub mod books;
pub mod carts;
pub mod health;
pub mod orders;
pub mod password;
pub mod reviews;
pub mod users;
pub mod wishlist;
