use serde::{Deserialize, Serialize};
use std::fmt;

/// Who a session token was issued to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A registered user (token carries a user id)
    User,
    /// The configured administrator (token carries an email)
    Admin,
}

/// Capabilities required by the administrative routes
///
/// Every privileged route names exactly one of these; there is no implicit
/// "is admin" check anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCapability {
    /// Toggle a user's verified flag (`PUT /verify/:id`)
    VerifyUsers,

    /// Approve or reject AgriConnect submissions
    ReviewSubmissions,
}

impl AdminCapability {
    /// All capabilities, in declaration order
    pub const ALL: [AdminCapability; 2] =
        [AdminCapability::VerifyUsers, AdminCapability::ReviewSubmissions];

    /// Whether a token holder with `role` has this capability
    pub fn granted_to(&self, role: Role) -> bool {
        match role {
            Role::Admin => true,
            Role::User => false,
        }
    }
}

impl fmt::Display for AdminCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AdminCapability::VerifyUsers => "verify_users",
            AdminCapability::ReviewSubmissions => "review_submissions",
        };
        f.write_str(name)
    }
}
