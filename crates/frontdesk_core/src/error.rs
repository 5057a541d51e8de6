//! crates/frontdesk_core/src/error.rs
//!
//! Errors returned by the front desk services.
//!
//! Missing records are not errors here: lookups return `Option` and deletes
//! return `bool`, leaving the caller to decide how to report them.

use std::sync::LazyLock;

use regex::Regex;

/// Accepted shape for guest mobile and staff contact numbers.
static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").expect("phone number pattern is valid"));

/// Input that failed a shape or range check. `field` uses the camelCase name
/// the dashboard forms use, so clients can attach the message to the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The request is well formed but clashes with existing records.
    #[error("Conflict: {0}")]
    Conflict(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require_text(field: &'static str, value: &str, message: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, message));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn require_phone_number(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if !PHONE_NUMBER.is_match(trimmed) {
        return Err(ValidationError::new(
            field,
            "Valid mobile number required (at least 10 digits)",
        ));
    }
    Ok(trimmed.to_string())
}
