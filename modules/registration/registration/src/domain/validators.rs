//! Field validators.
//!
//! Every validator is a pure function from the field's current value (and,
//! for cross-field rules, the values it depends on) to an ordered list of
//! violation messages. An empty list means the value is valid.

use std::sync::LazyLock;

use regex::Regex;
use registration_sdk::{FieldId, RegistrationInput};

/// Ordered violations for one field; empty means valid.
pub type ValidationResult = Vec<String>;

pub const INVALID_EMAIL: &str = "Invalid e-mail format";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const MISSING_UPPERCASE: &str = "Password must contain at least one uppercase letter";
pub const MISSING_LOWERCASE: &str = "Password must contain at least one lowercase letter";
pub const MISSING_DIGIT: &str = "Password must contain at least one number";
pub const MISSING_SPECIAL: &str = "Password must contain at least one special character";

#[allow(clippy::expect_used)]
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("static regex should not panic")
});

/// Read access to the other fields of the form.
pub trait FieldLookup {
    fn value_of(&self, field: FieldId) -> &str;
}

impl FieldLookup for RegistrationInput {
    fn value_of(&self, field: FieldId) -> &str {
        self.get(field)
    }
}

/// A validation rule bound to one field.
pub trait FieldValidator: Send + Sync {
    /// Fields whose value this rule reads. A change to any of them re-runs the rule.
    fn depends_on(&self) -> &[FieldId] {
        &[]
    }

    fn validate(&self, value: &str, form: &dyn FieldLookup) -> ValidationResult;
}

#[must_use]
pub fn required(label: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        vec![format!("{label} is required")]
    } else {
        Vec::new()
    }
}

#[must_use]
pub fn email_format(value: &str) -> ValidationResult {
    if EMAIL_REGEX.is_match(value) {
        Vec::new()
    } else {
        vec![INVALID_EMAIL.to_owned()]
    }
}

/// Password strength: length, upper, lower, digit, special.
///
/// All failing rules are reported in that order; callers that show a single
/// message take the first one.
#[must_use]
pub fn password_strength(value: &str, min_length: usize) -> ValidationResult {
    let mut violations = Vec::new();

    if value.chars().count() < min_length {
        violations.push(format!(
            "Password must be at least {min_length} characters"
        ));
    }
    if !value.chars().any(char::is_uppercase) {
        violations.push(MISSING_UPPERCASE.to_owned());
    }
    if !value.chars().any(char::is_lowercase) {
        violations.push(MISSING_LOWERCASE.to_owned());
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        violations.push(MISSING_DIGIT.to_owned());
    }
    if !value
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
    {
        violations.push(MISSING_SPECIAL.to_owned());
    }

    violations
}

#[must_use]
pub fn confirmation_match(value: &str, password: &str) -> ValidationResult {
    if value == password {
        Vec::new()
    } else {
        vec![PASSWORDS_DO_NOT_MATCH.to_owned()]
    }
}

/// Non-blank value, reported with the field label.
pub struct Required {
    label: &'static str,
}

impl Required {
    #[must_use]
    pub fn new(field: FieldId) -> Self {
        Self {
            label: field.label(),
        }
    }
}

impl FieldValidator for Required {
    fn validate(&self, value: &str, _form: &dyn FieldLookup) -> ValidationResult {
        required(self.label, value)
    }
}

pub struct EmailFormat;

impl FieldValidator for EmailFormat {
    fn validate(&self, value: &str, _form: &dyn FieldLookup) -> ValidationResult {
        email_format(value)
    }
}

pub struct PasswordStrength {
    min_length: usize,
}

impl PasswordStrength {
    #[must_use]
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl FieldValidator for PasswordStrength {
    fn validate(&self, value: &str, _form: &dyn FieldLookup) -> ValidationResult {
        password_strength(value, self.min_length)
    }
}

/// Value must equal the live value of another field.
pub struct MatchesField {
    other: [FieldId; 1],
}

impl MatchesField {
    #[must_use]
    pub fn new(other: FieldId) -> Self {
        Self { other: [other] }
    }
}

impl FieldValidator for MatchesField {
    fn depends_on(&self) -> &[FieldId] {
        &self.other
    }

    fn validate(&self, value: &str, form: &dyn FieldLookup) -> ValidationResult {
        confirmation_match(value, form.value_of(self.other[0]))
    }
}
