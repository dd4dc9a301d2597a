//! Domain models for the storefront.

pub mod cart;
pub mod catalog;
pub mod discount;
pub mod order;
pub mod page;
pub mod review;
pub mod session;
pub mod user;

pub use cart::Cart;
pub use catalog::{Category, NewProduct, Product};
pub use discount::{Discount, NewDiscount};
pub use order::{NewOrder, Order, OrderDetail, OrderLine};
pub use page::Page;
pub use review::{Review, ReviewWithAuthor};
pub use session::{CurrentUser, session_keys};
pub use user::{NewUser, User};
