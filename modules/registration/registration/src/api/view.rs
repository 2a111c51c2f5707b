//! View model of the registration page.
//!
//! A renderer needs nothing else: every input with its label, placeholder,
//! displayed value and message, the submit control state and the status line.

use registration_sdk::{FieldId, SubmissionStatus};
use serde::Serialize;

use crate::domain::field::FieldController;
use crate::domain::session::RegistrationSession;

pub const SUBMIT_LABEL: &str = "Register";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Email,
    Password,
}

impl From<FieldId> for InputKind {
    fn from(id: FieldId) -> Self {
        match id {
            FieldId::Email => InputKind::Email,
            FieldId::Password | FieldId::PasswordConfirmation => InputKind::Password,
            FieldId::Name | FieldId::AccessCode => InputKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub id: FieldId,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: InputKind,
    /// Displayed value; password inputs show one `*` per character.
    pub value: String,
    pub error_message: Option<String>,
}

impl From<&FieldController> for FieldView {
    fn from(field: &FieldController) -> Self {
        let id = field.id();
        let kind = InputKind::from(id);
        let value = if kind == InputKind::Password {
            "*".repeat(field.value().chars().count())
        } else {
            field.value().to_owned()
        };
        Self {
            id,
            label: id.label(),
            placeholder: id.placeholder(),
            kind,
            value,
            error_message: field.error_message().map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitView {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub failed: bool,
    pub message: String,
}

impl From<&SubmissionStatus> for StatusView {
    fn from(status: &SubmissionStatus) -> Self {
        Self {
            failed: status.failed,
            message: status.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    /// Absent until the first submission settles.
    pub status: Option<StatusView>,
    pub fields: Vec<FieldView>,
    pub submit: SubmitView,
}

impl FormView {
    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.id == id)
    }
}

impl From<&RegistrationSession> for FormView {
    fn from(session: &RegistrationSession) -> Self {
        Self {
            status: session.status().map(StatusView::from),
            fields: session.form().fields().map(FieldView::from).collect(),
            submit: SubmitView {
                label: SUBMIT_LABEL,
                disabled: !session.can_submit(),
            },
        }
    }
}
