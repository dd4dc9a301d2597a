//! HTTP middleware: sessions and authentication extractors.

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, clear_current_user, current_cart, current_user, set_current_user};
pub use session::{create_session_layer, create_session_store};
