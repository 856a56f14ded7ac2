//! SMTP notifier built on lettre
//!
//! Configuration keys (read on every send):
//! - `SMTP_SERVER`: relay host
//! - `SMTP_PORT`: 465 (implicit TLS) or 587 (STARTTLS)
//! - `SMTP_USER`: login, also used as the From address
//! - `SMTP_PASSWORD`: login password
//! - `NOTIFICATION_EMAIL`: where notifications go

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{NotificationSender, NotifyError};
use crate::config::ConfigSource;
use crate::models::ContactSubmission;

pub const SMTP_SERVER: &str = "SMTP_SERVER";
pub const SMTP_PORT: &str = "SMTP_PORT";
pub const SMTP_USER: &str = "SMTP_USER";
pub const SMTP_PASSWORD: &str = "SMTP_PASSWORD";
pub const NOTIFICATION_EMAIL: &str = "NOTIFICATION_EMAIL";

/// Subject line of every notification
pub const NOTIFICATION_SUBJECT: &str = "New Contact Message Received";

/// Socket timeout for the SMTP exchange
pub const DEFAULT_SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// How the connection to the relay is secured, chosen by port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportSecurity {
    /// TLS from the first byte (port 465)
    ImplicitTls,
    /// Plaintext upgraded with STARTTLS (port 587)
    StartTls,
}

impl TransportSecurity {
    pub fn for_port(port: u16) -> Result<Self, NotifyError> {
        match port {
            465 => Ok(Self::ImplicitTls),
            587 => Ok(Self::StartTls),
            other => Err(NotifyError::UnsupportedPort(other)),
        }
    }
}

/// Resolved SMTP settings
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub recipient: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl SmtpSettings {
    /// Read all five keys; the first missing one is reported.
    pub fn load(source: &dyn ConfigSource) -> Result<Self, NotifyError> {
        let server = require(source, SMTP_SERVER)?;
        let port = require(source, SMTP_PORT)?;
        let user = require(source, SMTP_USER)?;
        let password = require(source, SMTP_PASSWORD)?;
        let recipient = require(source, NOTIFICATION_EMAIL)?;

        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|e| NotifyError::InvalidConfig {
                key: SMTP_PORT,
                reason: e.to_string(),
            })?;

        Ok(Self {
            server,
            port,
            user,
            password,
            recipient,
        })
    }
}

fn require(source: &dyn ConfigSource, key: &'static str) -> Result<String, NotifyError> {
    source
        .get(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(NotifyError::MissingConfig { key })
}

/// Plain-text notification body.
pub fn render_body(submission: &ContactSubmission, received_at: DateTime<Local>) -> String {
    format!(
        "Name: {}\nEmail: {}\nMessage: {}\n\nReceived at: {}\n",
        submission.name,
        submission.email,
        submission.message,
        received_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// Build the email. Only operator-configured values go into headers.
pub fn build_message(
    settings: &SmtpSettings,
    submission: &ContactSubmission,
    received_at: DateTime<Local>,
) -> Result<Message, NotifyError> {
    let from: Mailbox = settings
        .user
        .parse()
        .map_err(|source| NotifyError::Address {
            field: SMTP_USER,
            source,
        })?;
    let to: Mailbox = settings
        .recipient
        .parse()
        .map_err(|source| NotifyError::Address {
            field: NOTIFICATION_EMAIL,
            source,
        })?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(NOTIFICATION_SUBJECT)
        .header(ContentType::TEXT_PLAIN)
        .body(render_body(submission, received_at))?;

    Ok(message)
}

/// Sends contact notifications through an authenticated SMTP relay
pub struct SmtpNotifier {
    config: Arc<dyn ConfigSource>,
    timeout: Duration,
}

impl SmtpNotifier {
    pub fn new(config: Arc<dyn ConfigSource>) -> Self {
        Self {
            config,
            timeout: DEFAULT_SMTP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        let settings = SmtpSettings::load(self.config.as_ref())?;
        let email = build_message(&settings, submission, Local::now())?;

        // Rejects unknown ports before any connection is made
        let security = TransportSecurity::for_port(settings.port)?;
        let builder = match security {
            TransportSecurity::ImplicitTls => {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.server)?
            }
            TransportSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.server)?
            }
        };

        let mailer = builder
            .port(settings.port)
            .credentials(Credentials::new(settings.user, settings.password))
            .timeout(Some(self.timeout))
            .build();

        tracing::debug!(
            server = %settings.server,
            port = settings.port,
            security = ?security,
            "Sending contact notification"
        );
        mailer.send(email).await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationSender for SmtpNotifier {
    async fn send(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        match self.deliver(submission).await {
            Ok(()) => {
                tracing::info!("Contact notification sent");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, config = e.is_config(), "Contact notification failed");
                Err(e)
            }
        }
    }
}
