//! Admin credential check against the configured identity.

use sha2::{Digest, Sha256};

use crate::config::AdminCredentials;

/// Whether `email`/`password` exactly match the configured admin pair
///
/// The password comparison runs over SHA-256 digests so its timing does not
/// depend on where the first differing byte is.
pub fn admin_credentials_match(admin: &AdminCredentials, email: &str, password: &str) -> bool {
    let email_ok = email == admin.email;
    let password_ok = constant_time_eq(
        &Sha256::digest(password.as_bytes()),
        &Sha256::digest(admin.password.as_bytes()),
    );
    email_ok & password_ok
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
