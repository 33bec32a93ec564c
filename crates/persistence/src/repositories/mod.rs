//! Repository implementations for database operations.

pub mod book;
pub mod cart;
pub mod order;
pub mod password_request;
pub mod review;
pub mod role;
pub mod user;
pub mod wishlist;

pub use book::BookRepository;
pub use cart::CartRepository;
pub use order::OrderRepository;
pub use password_request::PasswordRequestRepository;
pub use review::ReviewRepository;
pub use role::RoleRepository;
pub use user::UserRepository;
pub use wishlist::WishlistRepository;
