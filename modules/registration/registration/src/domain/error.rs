use registration_sdk::{FieldId, RegistrationError};
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation failed: {field}: {message}")]
    Validation { field: FieldId, message: String },

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Invalid form definition: {reason}")]
    FormDefinition { reason: String },
}

impl DomainError {
    #[must_use]
    pub fn validation(field: FieldId, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn form_definition(reason: impl Into<String>) -> Self {
        Self::FormDefinition {
            reason: reason.into(),
        }
    }
}

/// Failure reported by the submission collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The server answered with a non-success status.
    #[error("registration rejected with HTTP {status}")]
    Rejected {
        status: u16,
        /// User-facing text from the response body's `message` field, if usable.
        message: Option<String>,
    },

    /// The request never produced a response (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),
}

impl SubmissionError {
    #[must_use]
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        Self::Rejected { status, message }
    }

    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    /// The server-provided message, when there is one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for RegistrationError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::Validation { field, message } => {
                RegistrationError::validation(field, message)
            }
            // One-shot registrations own their gate and never see this.
            DomainError::SubmissionInFlight | DomainError::FormDefinition { .. } => {
                RegistrationError::internal()
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_sdk_errors() {
        assert_eq!(
            RegistrationError::from(DomainError::validation(FieldId::Email, "Invalid e-mail format")),
            RegistrationError::validation(FieldId::Email, "Invalid e-mail format")
        );
        assert_eq!(
            RegistrationError::from(DomainError::form_definition("cycle")),
            RegistrationError::Internal
        );
    }

    #[test]
    fn server_message_only_for_rejections_that_carry_one() {
        let rejected = SubmissionError::rejected(409, Some("Usu\u{e1}rio j\u{e1} existe".to_owned()));
        assert_eq!(rejected.server_message(), Some("Usu\u{e1}rio j\u{e1} existe"));
        assert_eq!(SubmissionError::rejected(500, None).server_message(), None);
        assert_eq!(SubmissionError::transport("timeout").server_message(), None);
    }
}
