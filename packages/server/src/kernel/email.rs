//! SMTP notifier backed by lettre.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::SmtpSettings;
use crate::kernel::BaseNotifier;

/// Async email transport wrapper (SMTP or no-op)
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Build the notifier from configuration
    ///
    /// If the SMTP host is empty, operates in no-op mode (logs only).
    pub fn new(settings: &SmtpSettings) -> Result<Self> {
        let from = settings
            .from
            .parse::<Mailbox>()
            .context("Invalid SMTP_FROM address")?;

        let transport = if settings.host.trim().is_empty() {
            warn!("SMTP host not configured; notifier will operate in no-op mode");
            None
        } else {
            let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .context("Failed to configure SMTP transport")?
                .port(settings.port);

            let builder = match (&settings.username, &settings.password) {
                (Some(username), Some(password)) => {
                    builder.credentials(Credentials::new(username.clone(), password.clone()))
                }
                _ => builder,
            };

            Some(Arc::new(builder.build()))
        };

        Ok(Self { transport, from })
    }

    /// Check if SMTP transport is enabled
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }
}

#[async_trait]
impl BaseNotifier for SmtpNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        let Some(transport) = &self.transport else {
            info!(subject, "notifier running in no-op mode; skipping actual send");
            return Ok(());
        };

        let to = recipient
            .parse::<Mailbox>()
            .context("Invalid recipient email address")?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .context("Failed to build email message")?;

        transport.send(email).await.context("Failed to send email")?;
        info!(subject, "email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(host: &str, from: &str) -> SmtpSettings {
        SmtpSettings {
            host: host.to_string(),
            port: 587,
            username: None,
            password: None,
            from: from.to_string(),
        }
    }

    #[test]
    fn test_empty_host_is_noop() {
        let notifier =
            SmtpNotifier::new(&settings("", "AgriConnect <no-reply@agriconnect.local>")).unwrap();
        assert!(!notifier.is_enabled());
    }

    #[test]
    fn test_invalid_from_rejected() {
        assert!(SmtpNotifier::new(&settings("", "not an address")).is_err());
    }

    #[tokio::test]
    async fn test_noop_send_succeeds() {
        let notifier = SmtpNotifier::new(&settings("", "no-reply@agriconnect.local")).unwrap();
        notifier
            .send("asha@example.com", "AgriConnect Registration", "Hello")
            .await
            .unwrap();
    }
}
