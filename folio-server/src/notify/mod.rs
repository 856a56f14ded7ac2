//! Contact notification delivery
//!
//! [`NotificationSender`] is best-effort: every failure comes back as a
//! [`NotifyError`] value. The recorder turns the outcome into the
//! `email_sent` flag and never fails a submission because of it.

pub mod smtp;

use std::time::Duration;

use async_trait::async_trait;

use crate::models::ContactSubmission;

pub use smtp::{SmtpNotifier, SmtpSettings, TransportSecurity};

/// Trait for sending one notification per contact submission (testable)
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, submission: &ContactSubmission) -> Result<(), NotifyError>;
}

/// Why a notification was not delivered
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("missing email configuration: {key}")]
    MissingConfig { key: &'static str },

    #[error("invalid email configuration {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    #[error("unsupported SMTP port: {0}")]
    UnsupportedPort(u16),

    #[error("invalid {field} address: {source}")]
    Address {
        field: &'static str,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("notification timed out after {0:?}")]
    TimedOut(Duration),

    #[error("notification sender panicked")]
    Panicked,
}

impl NotifyError {
    /// Configuration problems, as opposed to delivery failures.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::MissingConfig { .. }
                | Self::InvalidConfig { .. }
                | Self::UnsupportedPort(_)
                | Self::Address { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_classified() {
        assert!(NotifyError::MissingConfig { key: "SMTP_USER" }.is_config());
        assert!(NotifyError::UnsupportedPort(25).is_config());
        assert!(!NotifyError::Panicked.is_config());
        assert!(!NotifyError::TimedOut(Duration::from_secs(1)).is_config());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            NotifyError::MissingConfig { key: "SMTP_PASSWORD" }.to_string(),
            "missing email configuration: SMTP_PASSWORD"
        );
        assert_eq!(
            NotifyError::UnsupportedPort(2525).to_string(),
            "unsupported SMTP port: 2525"
        );
    }
}
