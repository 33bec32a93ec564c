//! Domain models for the bookstore.

pub mod book;
pub mod cart;
pub mod order;
pub mod password_reset;
pub mod review;
pub mod role;
pub mod user;
pub mod wishlist;

pub use book::Book;
pub use cart::{Cart, CartItem, CartItemWithBook, CartView};
pub use order::{Order, OrderItem, OrderStatus, PaymentMethod};
pub use password_reset::PasswordChangeRequest;
pub use review::Review;
pub use role::{Role, RoleTable};
pub use user::User;
pub use wishlist::WishlistEntry;
