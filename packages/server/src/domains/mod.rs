// Business domains
pub mod agriconnect;
pub mod auth;
pub mod users;
