//! Validation error types and field helpers shared by the request forms

use std::fmt;

/// Validation error for incoming forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty (or whitespace only) when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value is not a syntactically valid email address
    InvalidEmail { value: String },

    /// String doesn't match required format (e.g. a numeric id)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidEmail { value } => {
                write!(f, "'{}' is not a valid email address", value)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Require a non-blank value of at most `max` characters.
pub fn required(field: &'static str, value: String, max: usize) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    bounded(field, value, max)
}

/// Limit a value to `max` characters (counted as chars, not bytes).
pub fn bounded(field: &'static str, value: String, max: usize) -> Result<String, ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value)
}
