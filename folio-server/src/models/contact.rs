//! Contact message models
//!
//! A submission moves through three shapes:
//! - [`ContactForm`]: raw JSON body, untrusted
//! - [`ContactSubmission`]: validated at the HTTP boundary
//! - [`ContactMessage`]: the committed row, with store-assigned id

use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use super::validation::{bounded, required, ValidationError};

/// Column limits for `contact_messages`
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_SUBJECT_LEN: usize = 200;

/// POST /contact request body
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Validate the form into a submission the recorder accepts.
    ///
    /// # Rules
    /// - `name`: non-blank, at most 100 characters
    /// - `email`: valid address, at most 100 characters
    /// - `subject`: optional, at most 200 characters
    /// - `message`: must be present, any length
    pub fn validate(self) -> Result<ContactSubmission, ValidationError> {
        let name = required("name", self.name, MAX_NAME_LEN)?;

        let email = self.email.trim().to_owned();
        if !EmailAddress::is_valid(&email) {
            return Err(ValidationError::InvalidEmail { value: email });
        }
        let email = bounded("email", email, MAX_EMAIL_LEN)?;

        let subject = self
            .subject
            .map(|s| bounded("subject", s, MAX_SUBJECT_LEN))
            .transpose()?;

        Ok(ContactSubmission {
            name,
            email,
            subject,
            message: self.message,
        })
    }
}

/// A contact submission accepted by the boundary layer.
///
/// `name` and `message` are attacker-controlled; they only ever end up in
/// the notification body, never in a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: None,
            message: message.into(),
        }
    }
}

/// Committed contact message row
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub email_sent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.into(),
            email: email.into(),
            subject: None,
            message: message.into(),
        }
    }

    #[test]
    fn valid_form() {
        let submission = form("Ada", "ada@example.com", "Hello").validate().unwrap();
        assert_eq!(submission, ContactSubmission::new("Ada", "ada@example.com", "Hello"));
    }

    #[test]
    fn rejects_invalid_email() {
        let err = form("Ada", "not-an-address", "Hello").validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEmail { .. }));
    }

    #[test]
    fn trims_email() {
        let submission = form("Ada", "  ada@example.com ", "Hello").validate().unwrap();
        assert_eq!(submission.email, "ada@example.com");
    }

    #[test]
    fn rejects_long_name() {
        let name = "a".repeat(MAX_NAME_LEN + 1);
        let err = form(&name, "ada@example.com", "Hello").validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN
            }
        );
    }

    #[test]
    fn subject_is_carried_but_bounded() {
        let mut f = form("Ada", "ada@example.com", "Hello");
        f.subject = Some("Hi".into());
        assert_eq!(f.clone().validate().unwrap().subject.as_deref(), Some("Hi"));

        f.subject = Some("s".repeat(MAX_SUBJECT_LEN + 1));
        assert!(f.validate().is_err());
    }

    #[test]
    fn deserializes_without_subject() {
        let f: ContactForm = serde_json::from_str(
            r#"{"name": "Ada", "email": "ada@example.com", "message": "Hello"}"#,
        )
        .unwrap();
        assert!(f.subject.is_none());
    }
}
