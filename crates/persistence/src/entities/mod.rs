//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod book;
pub mod cart;
pub mod order;
pub mod password_request;
pub mod review;
pub mod role;
pub mod user;
pub mod wishlist;

pub use book::BookEntity;
pub use cart::{CartEntity, CartItemEntity, CartItemWithBookEntity};
pub use order::{OrderEntity, OrderItemEntity, OrderRowEntity};
pub use password_request::PasswordChangeRequestEntity;
pub use review::ReviewEntity;
pub use role::RoleEntity;
pub use user::UserEntity;
pub use wishlist::WishlistEntity;
