// AgriConnect - API Core
//
// Backend for farmer registration, password login, and identity-proof
// submissions reviewed by a single administrator.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
