use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Minimum accepted length of the JWT signing secret, in bytes
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Application configuration loaded from environment variables
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub admin: AdminCredentials,
    pub smtp: SmtpSettings,
    pub upload_dir: PathBuf,
    pub allowed_origins: Vec<String>,
}

/// The single administrator identity, supplied by the environment
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

/// SMTP settings for the confirmation notifier
///
/// An empty `host` puts the notifier in log-only mode.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup and validate it
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} must be set"))
        };

        let smtp_username = lookup("SMTP_USERNAME").filter(|v| !v.is_empty());
        let smtp_password = lookup("SMTP_PASSWORD").filter(|v| !v.is_empty());
        if smtp_username.is_some() != smtp_password.is_some() {
            bail!("SMTP_USERNAME and SMTP_PASSWORD must be set together");
        }

        let config = Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port: lookup("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "agriconnect".to_string()),
            admin: AdminCredentials {
                email: required("ADMIN_EMAIL")?,
                password: required("ADMIN_PASSWORD")?,
            },
            smtp: SmtpSettings {
                host: lookup("SMTP_HOST").unwrap_or_default(),
                port: lookup("SMTP_PORT")
                    .unwrap_or_else(|| "587".to_string())
                    .parse()
                    .context("SMTP_PORT must be a valid number")?,
                username: smtp_username,
                password: smtp_password,
                from: lookup("SMTP_FROM")
                    .unwrap_or_else(|| "AgriConnect <no-reply@agriconnect.local>".to_string()),
            },
            upload_dir: PathBuf::from(lookup("UPLOAD_DIR").unwrap_or_else(|| "uploads".to_string())),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            bail!("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} bytes");
        }
        if !self.admin.email.contains('@') {
            bail!("ADMIN_EMAIL must be an email address");
        }
        if self.database_max_connections == 0 {
            bail!("DATABASE_MAX_CONNECTIONS must be greater than zero");
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_max_connections", &self.database_max_connections)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("admin", &self.admin)
            .field("smtp", &self.smtp)
            .field("upload_dir", &self.upload_dir)
            .field("allowed_origins", &self.allowed_origins)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DATABASE_URL", "postgres://localhost/agriconnect"),
            ("JWT_SECRET", "0123456789abcdef0123456789abcdef"),
            ("ADMIN_EMAIL", "admin@example.com"),
            ("ADMIN_PASSWORD", "admin123"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<Config> {
        Config::from_lookup(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.jwt_issuer, "agriconnect");
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.smtp.port, 587);
        assert!(config.smtp.host.is_empty());
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_missing_admin_fails() {
        let mut env = base_env();
        env.remove("ADMIN_PASSWORD");
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("ADMIN_PASSWORD"));
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut env = base_env();
        env.insert("JWT_SECRET", "secretKey");
        assert!(load(&env).is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut env = base_env();
        env.insert("PORT", "not-a-port");
        assert!(load(&env).is_err());
    }

    #[test]
    fn test_smtp_credentials_must_pair() {
        let mut env = base_env();
        env.insert("SMTP_USERNAME", "mailer");
        assert!(load(&env).is_err());

        env.insert("SMTP_PASSWORD", "app-password");
        let config = load(&env).unwrap();
        assert_eq!(config.smtp.username.as_deref(), Some("mailer"));
    }

    #[test]
    fn test_allowed_origins_split() {
        let mut env = base_env();
        env.insert("ALLOWED_ORIGINS", "http://localhost:3000, https://agri.example ,");
        let config = load(&env).unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "https://agri.example"]
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&base_env()).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("0123456789abcdef"));
        assert!(!rendered.contains("admin123"));
        assert!(!rendered.contains("postgres://"));
    }
}
