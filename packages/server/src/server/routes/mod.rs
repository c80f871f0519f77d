// HTTP routes
pub mod agriconnect;
pub mod auth;
pub mod health;

pub use agriconnect::*;
pub use auth::*;
pub use health::*;
