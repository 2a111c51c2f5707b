//! Plain-text rendering of the form view model.

use std::fmt;

use registration::api::{FieldView, FormView, StatusView};

/// One-line status banner.
pub struct Status<'a>(pub &'a StatusView);

impl fmt::Display for Status<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.0.failed { "failed" } else { "ok" };
        write!(f, "[{tag}] {}", self.0.message)
    }
}

pub struct Field<'a>(pub &'a FieldView);

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.0;
        if field.value.is_empty() {
            write!(f, "{}: <{}>", field.label, field.placeholder)?;
        } else {
            write!(f, "{}: {}", field.label, field.value)?;
        }
        if let Some(message) = &field.error_message {
            write!(f, "\n    ! {message}")?;
        }
        Ok(())
    }
}

/// The whole page: status, fields, submit control.
pub struct Page<'a>(pub &'a FormView);

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        if let Some(status) = &view.status {
            writeln!(f, "{}", Status(status))?;
        }
        for field in &view.fields {
            writeln!(f, "{}", Field(field))?;
        }
        let state = if view.submit.disabled {
            "disabled"
        } else {
            "enabled"
        };
        write!(f, "[ {} ] ({state})", view.submit.label)
    }
}
