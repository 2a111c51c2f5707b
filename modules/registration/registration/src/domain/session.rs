//! One interactive registration: a form, its submission gate and the last status.

use std::sync::Arc;

use registration_sdk::{FieldId, SubmissionStatus};

use crate::domain::error::DomainError;
use crate::domain::form::RegistrationForm;
use crate::domain::service::{RegistrationService, SubmissionGate};

#[derive(Debug)]
pub struct RegistrationSession {
    service: Arc<RegistrationService>,
    form: RegistrationForm,
    gate: SubmissionGate,
    status: Option<SubmissionStatus>,
}

impl RegistrationSession {
    #[must_use]
    pub fn new(service: Arc<RegistrationService>) -> Self {
        let form = service.new_form();
        Self {
            service,
            form,
            gate: SubmissionGate::default(),
            status: None,
        }
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.form.set(field, value);
    }

    #[must_use]
    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Status of the last submission; `None` until the first attempt settles.
    #[must_use]
    pub fn status(&self) -> Option<&SubmissionStatus> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// Submit is enabled when every field is valid and nothing is in flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.form.is_submittable() && !self.gate.is_pending()
    }

    /// Submit the current values and record the resulting status.
    ///
    /// The exclusive borrow serialises submits on one session; the gate
    /// additionally guards callers that share it through
    /// [`RegistrationService::submit`].
    ///
    /// # Errors
    /// See [`RegistrationService::submit`]; the status is left unchanged.
    pub async fn submit(&mut self) -> Result<&SubmissionStatus, DomainError> {
        let status = self.service.submit(&self.gate, &self.form).await?;
        Ok(&*self.status.insert(status))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::error::SubmissionError;
    use crate::domain::ports::SubmissionPort;
    use crate::domain::service::ServiceConfig;
    use async_trait::async_trait;
    use registration_sdk::NewRegistration;

    struct RejectingPort;

    #[async_trait]
    impl SubmissionPort for RejectingPort {
        async fn submit(&self, _body: &NewRegistration) -> Result<(), SubmissionError> {
            Err(SubmissionError::rejected(
                400,
                Some("Usu\u{e1}rio j\u{e1} existe".to_owned()),
            ))
        }
    }

    fn session() -> RegistrationSession {
        RegistrationSession::new(Arc::new(RegistrationService::new(
            Arc::new(RejectingPort),
            ServiceConfig::default(),
        )))
    }

    fn fill_valid(session: &mut RegistrationSession) {
        session.set(FieldId::Name, "Cristian Trindade");
        session.set(FieldId::Email, "teste@teste.com");
        session.set(FieldId::Password, "S3nh@!123");
        session.set(FieldId::PasswordConfirmation, "S3nh@!123");
        session.set(FieldId::AccessCode, "ABC-123");
    }

    #[tokio::test]
    async fn status_is_absent_until_submission() {
        let mut session = session();
        assert!(session.status().is_none());
        assert!(!session.can_submit());

        fill_valid(&mut session);
        assert!(session.can_submit());

        let status = session.submit().await.unwrap().clone();
        assert_eq!(status, SubmissionStatus::failed("Usu\u{e1}rio j\u{e1} existe"));
        assert_eq!(session.status(), Some(&status));
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn invalid_submit_keeps_previous_status() {
        let mut session = session();
        fill_valid(&mut session);
        session.submit().await.unwrap();

        session.set(FieldId::Email, "teste@teste");
        let err = session.submit().await.unwrap_err();

        assert!(matches!(err, DomainError::Validation { field: FieldId::Email, .. }));
        assert!(session.status().is_some_and(|s| s.failed));
    }
}
