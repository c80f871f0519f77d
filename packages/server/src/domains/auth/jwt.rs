use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Role, UserId};

/// Session tokens expire one hour after issue
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// JWT Claims - data stored in the token
///
/// User tokens carry `user_id`; admin tokens carry `email`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (user id or admin email)
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,    // Expiration timestamp
    pub iat: i64,    // Issued at timestamp
    pub iss: String, // Issuer
    pub jti: String, // JWT ID (unique token identifier)
}

/// JWT Service - creates and verifies session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    /// Create new JWT service with secret and issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a token for a registered user
    pub fn create_user_token(&self, user_id: UserId) -> Result<String> {
        self.sign(user_id.to_string(), Role::User, Some(user_id), None)
    }

    /// Create a token for the administrator
    pub fn create_admin_token(&self, email: &str) -> Result<String> {
        self.sign(email.to_string(), Role::Admin, None, Some(email.to_string()))
    }

    fn sign(
        &self,
        sub: String,
        role: Role,
        user_id: Option<UserId>,
        email: Option<String>,
    ) -> Result<String> {
        let now = chrono::Utc::now().timestamp();

        let claims = Claims {
            sub,
            role,
            user_id,
            email,
            exp: now + TOKEN_TTL_SECS,
            iat: now,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(), // Unique token ID
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a JWT token
    ///
    /// Returns claims if the signature, issuer, and expiry all check out
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}
