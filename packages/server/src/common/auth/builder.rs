use super::{AdminCapability, AuthError, Role};
use crate::domains::auth::Claims;

/// Entry point for authorization checks
///
/// Usage:
/// ```rust,ignore
/// Actor::from_claims(&claims)
///     .can(AdminCapability::VerifyUsers)
///     .check()?;
/// ```
pub struct Actor {
    subject: String,
    role: Role,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// # Arguments
    /// * `subject` - The token subject, for logging
    /// * `role` - Role from the verified token
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }

    /// Actor for the holder of already-verified claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self::new(claims.sub.clone(), claims.role)
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: AdminCapability) -> CapabilityBuilder {
        CapabilityBuilder {
            subject: self.subject,
            role: self.role,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    subject: String,
    role: Role,
    capability: AdminCapability,
}

impl CapabilityBuilder {
    /// Perform the authorization check
    pub fn check(self) -> Result<(), AuthError> {
        if self.capability.granted_to(self.role) {
            return Ok(());
        }

        tracing::warn!(
            subject = %self.subject,
            capability = %self.capability,
            "capability denied"
        );
        Err(AuthError::AdminRequired(self.capability))
    }
}
