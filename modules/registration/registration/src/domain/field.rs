//! Field controller: one validator bound to one mutable value.

use std::sync::Arc;

use registration_sdk::FieldId;

use super::validators::{FieldLookup, FieldValidator, ValidationResult};

/// Derived validity of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Valid,
    Invalid,
}

/// Binds a validator to a value and keeps its violations current.
///
/// Every value change re-runs the validator synchronously. The controller is
/// created against the empty value, so a required field starts `Invalid`.
#[derive(Clone)]
pub struct FieldController {
    id: FieldId,
    value: String,
    violations: ValidationResult,
    validator: Arc<dyn FieldValidator>,
}

impl FieldController {
    #[must_use]
    pub fn new(id: FieldId, validator: Arc<dyn FieldValidator>, form: &dyn FieldLookup) -> Self {
        let violations = validator.validate("", form);
        Self {
            id,
            value: String::new(),
            violations,
            validator,
        }
    }

    #[must_use]
    pub fn id(&self) -> FieldId {
        self.id
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    /// The message to display under the input, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.violations.first().map(String::as_str)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn state(&self) -> FieldState {
        if self.is_valid() {
            FieldState::Valid
        } else {
            FieldState::Invalid
        }
    }

    #[must_use]
    pub fn depends_on(&self) -> &[FieldId] {
        self.validator.depends_on()
    }

    /// Store a new value and re-validate it.
    pub fn set_value(&mut self, value: String, form: &dyn FieldLookup) {
        self.value = value;
        self.revalidate(form);
    }

    /// Re-run the validator against the current value.
    ///
    /// Used when a field this one depends on has changed.
    pub fn revalidate(&mut self, form: &dyn FieldLookup) {
        let before = self.state();
        self.violations = self.validator.validate(&self.value, form);
        let after = self.state();
        if before != after {
            tracing::debug!(field = %self.id, ?before, ?after, "field validity changed");
        }
    }
}

impl std::fmt::Debug for FieldController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: &str = if self.id.is_secret() {
            "<redacted>"
        } else {
            &self.value
        };
        f.debug_struct("FieldController")
            .field("id", &self.id)
            .field("value", &value)
            .field("violations", &self.violations)
            .finish_non_exhaustive()
    }
}
