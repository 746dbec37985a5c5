//! SMTP delivery via STARTTLS relay.

use std::time::Duration;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use log::{info, warn};
use tokio_retry::RetryIf;

use super::{build_ticket_message, TicketEmail, TicketMailer};
use crate::config::{Config, SMTP_TIMEOUT_SECS};
use crate::error_handling::{get_retry_strategy, is_retriable_mail_error, MailError};
use crate::ticket::short_id;

/// Sends ticket emails through an authenticated SMTP relay.
///
/// Built even when credentials are missing, so the server can start; every
/// send then fails with `MailError::NotConfigured`.
pub struct SmtpMailer {
    inner: Option<Configured>,
}

struct Configured {
    sender: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn from_config(config: &Config) -> Result<Self, MailError> {
        let (Some(sender), Some(password)) = (&config.sender_email, &config.sender_password) else {
            warn!("SENDER_EMAIL/SENDER_PASSWORD not set; ticket emails cannot be sent");
            return Ok(Self { inner: None });
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_server)?
            .port(config.smtp_port)
            .credentials(Credentials::new(sender.clone(), password.clone()))
            .timeout(Some(Duration::from_secs(SMTP_TIMEOUT_SECS)))
            .build();

        info!(
            "SMTP relay configured: {}:{} as {}",
            config.smtp_server, config.smtp_port, sender
        );
        Ok(Self {
            inner: Some(Configured {
                sender: sender.clone(),
                transport,
            }),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

#[async_trait]
impl TicketMailer for SmtpMailer {
    async fn send_ticket(&self, email: &TicketEmail) -> Result<(), MailError> {
        let configured = self.inner.as_ref().ok_or(MailError::NotConfigured)?;
        let message = build_ticket_message(&configured.sender, email)?;

        RetryIf::start(
            get_retry_strategy(),
            || {
                let message = message.clone();
                async move {
                    configured
                        .transport
                        .send(message)
                        .await
                        .map_err(MailError::from)
                }
            },
            |e: &MailError| {
                let retry = is_retriable_mail_error(e);
                if retry {
                    warn!("Transient SMTP failure, retrying: {e}");
                }
                retry
            },
        )
        .await?;

        info!(
            "Ticket {} emailed to {}",
            short_id(&email.ticket_id),
            email.email
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_mailer_refuses_to_send() {
        let mailer = SmtpMailer::from_config(&Config::default()).expect("should build");
        assert!(!mailer.is_configured());

        let result = mailer
            .send_ticket(&TicketEmail {
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
                ticket_id: "0123abcd".to_string(),
                qr_png: Vec::new(),
            })
            .await;
        assert!(matches!(result, Err(MailError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_configured_mailer() {
        let config = Config {
            sender_email: Some("sender@example.com".to_string()),
            sender_password: Some("secret".to_string()),
            ..Default::default()
        };
        let mailer = SmtpMailer::from_config(&config).expect("should build");
        assert!(mailer.is_configured());
    }
}
