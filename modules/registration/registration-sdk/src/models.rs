//! Public models for the `registration` module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the registration module and its consumers. Only
//! [`NewRegistration`] has a wire shape; it is the JSON body posted to the
//! registration endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five inputs of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Name,
    Email,
    Password,
    PasswordConfirmation,
    AccessCode,
}

impl FieldId {
    /// All fields in form order.
    pub const ALL: [FieldId; 5] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Password,
        FieldId::PasswordConfirmation,
        FieldId::AccessCode,
    ];

    /// Human-readable label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::Email => "E-mail",
            FieldId::Password => "Password",
            FieldId::PasswordConfirmation => "Password Confirmation",
            FieldId::AccessCode => "Access Code",
        }
    }

    /// Placeholder text shown inside an empty input.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::Email => "e-mail",
            FieldId::Password => "Password",
            FieldId::PasswordConfirmation => "Password Confirmation",
            FieldId::AccessCode => "Access code",
        }
    }

    /// Whether the input should be masked when rendered.
    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, FieldId::Password | FieldId::PasswordConfirmation)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw form input, all five values as typed by the user.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub access_code: String,
}

impl RegistrationInput {
    /// Current value of one field.
    #[must_use]
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Password => &self.password,
            FieldId::PasswordConfirmation => &self.password_confirmation,
            FieldId::AccessCode => &self.access_code,
        }
    }

    /// Replace the value of one field.
    pub fn set(&mut self, field: FieldId, value: String) {
        let slot = match field {
            FieldId::Name => &mut self.name,
            FieldId::Email => &mut self.email,
            FieldId::Password => &mut self.password,
            FieldId::PasswordConfirmation => &mut self.password_confirmation,
            FieldId::AccessCode => &mut self.access_code,
        };
        *slot = value;
    }
}

impl fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("password_confirmation", &"<redacted>")
            .field("access_code", &self.access_code)
            .finish()
    }
}

/// Request body posted to the registration endpoint.
///
/// The password confirmation is a local check only and is never sent.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub code_access: String,
}

impl From<&RegistrationInput> for NewRegistration {
    fn from(input: &RegistrationInput) -> Self {
        Self {
            name: input.name.clone(),
            email: input.email.clone(),
            password: input.password.clone(),
            code_access: input.access_code.clone(),
        }
    }
}

impl fmt::Debug for NewRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewRegistration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("code_access", &self.code_access)
            .finish()
    }
}

/// Outcome of one submission attempt, rendered above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionStatus {
    pub failed: bool,
    pub message: String,
}

impl SubmissionStatus {
    #[must_use]
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            failed: false,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            failed: true,
            message: message.into(),
        }
    }
}
