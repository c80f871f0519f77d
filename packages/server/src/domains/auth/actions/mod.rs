//! Auth domain actions - business logic functions
//!
//! Actions are async functions called directly from the HTTP handlers.

mod admin_login;
mod get_user_name;
mod login_user;
mod register_user;
mod reset_password;
mod verify_user;

pub use admin_login::admin_login;
pub use get_user_name::get_user_name;
pub use login_user::login_user;
pub use register_user::{register_user, Registration};
pub use reset_password::reset_password;
pub use verify_user::verify_user;
