//! Validation module
//!
//! Stateless validators for incoming request payloads. Every contract
//! violation is reported as an [`InvalidInput`] carrying the offending
//! field and the first violated constraint; validators never touch the
//! store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A request payload violated an input contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct InvalidInput {
    /// Which input field failed
    pub field: &'static str,
    /// The first violated constraint
    pub reason: String,
}

impl InvalidInput {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Tri-state patch field for partial updates.
///
/// Absent fields leave the stored value unchanged; nullable fields may be
/// explicitly cleared back to null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum FieldUpdate<T> {
    /// Leave the stored value as-is
    #[default]
    Keep,
    /// Reset the stored value to null
    Clear,
    /// Replace the stored value
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Apply this patch to the currently stored value
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            FieldUpdate::Keep => current,
            FieldUpdate::Clear => None,
            FieldUpdate::Set(value) => Some(value),
        }
    }

    /// The value this patch would write, if any
    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }
}

/// Validate an email address shape
///
/// Structural check only: a single `@` separating a non-empty local part
/// from a dotted domain, with no whitespace anywhere.
pub fn validate_email(email: &str) -> Result<(), InvalidInput> {
    if email.is_empty() {
        return Err(InvalidInput::new("email", "must not be empty"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(InvalidInput::new("email", "must not contain whitespace"));
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(InvalidInput::new("email", "must contain exactly one '@'")),
    };

    if local.is_empty() {
        return Err(InvalidInput::new("email", "missing local part"));
    }
    if domain.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.')
    {
        return Err(InvalidInput::new("email", "invalid domain"));
    }

    Ok(())
}

/// Validate that a name field is non-empty
pub fn validate_name(field: &'static str, name: &str) -> Result<(), InvalidInput> {
    if name.trim().is_empty() {
        return Err(InvalidInput::new(field, "must not be empty"));
    }
    Ok(())
}

/// Validate an accuracy percentage is within [0, 100]
pub fn validate_accuracy(value: f64) -> Result<(), InvalidInput> {
    if !(0.0..=100.0).contains(&value) {
        return Err(InvalidInput::new(
            "accuracy_percentage",
            "must be between 0 and 100",
        ));
    }
    Ok(())
}
