/// HTTP handlers
pub mod auth;
pub mod health;
pub mod users;

pub use auth::{login, register};
pub use health::{health_check, index};
pub use users::{delete_user, get_user, update_user};
