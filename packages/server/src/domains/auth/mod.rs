//! Auth domain - registration, login, password reset, admin login
//!
//! Responsibilities:
//! - bcrypt password hashing
//! - Session token (JWT) issuance and verification
//! - Admin credential check against configuration

pub mod actions;
pub mod admin;
pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtService, TOKEN_TTL_SECS};
