// Common types shared across the application

pub mod auth;
pub mod entity_ids;
pub mod error;
pub mod id;

pub use auth::{Actor, AdminCapability, AuthError, Role};
pub use entity_ids::*;
pub use error::{AppError, AppResult, ErrorBody};
pub use id::Id;
