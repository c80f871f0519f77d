//! Users domain - registered user records
//!
//! Users are created by registration, have their password replaced by reset,
//! and have their verified flag toggled by an administrator. They are never
//! deleted.

pub mod models;

pub use models::{NewUser, User};
