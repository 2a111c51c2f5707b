//! Public error types for the `registration` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

use crate::models::FieldId;

/// Errors that can be returned by the `RegistrationClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A field failed local validation; nothing was sent.
    #[error("Validation error: {field}: {message}")]
    Validation { field: FieldId, message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl RegistrationError {
    /// Create a Validation error.
    #[must_use]
    pub fn validation(field: FieldId, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create an Internal error.
    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
