/// Authorization module for AgriConnect
///
/// Administrative routes name the capability they need, and the check runs
/// against the verified token claims:
///
/// ```rust,ignore
/// use crate::common::auth::{Actor, AdminCapability};
///
/// Actor::from_claims(&claims)
///     .can(AdminCapability::ReviewSubmissions)
///     .check()?;
/// ```
///
/// Admin tokens hold every capability; user tokens hold none.

mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::{AdminCapability, Role};
pub use errors::AuthError;
