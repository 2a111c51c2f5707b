use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use registration_sdk::{RegistrationInput, SubmissionStatus};
use tracing::{debug, info, instrument, warn};

use crate::domain::error::{DomainError, SubmissionError};
use crate::domain::form::RegistrationForm;
use crate::domain::ports::SubmissionPort;

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub password_min_length: usize,
    pub success_message: String,
    pub fallback_error_message: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            password_min_length: 8,
            success_message: "Registration completed successfully".to_owned(),
            fallback_error_message: "Registration failed. Please try again.".to_owned(),
        }
    }
}

/// Tracks whether a submission is pending for one form.
#[derive(Debug, Default)]
pub struct SubmissionGate {
    pending: AtomicBool,
}

impl SubmissionGate {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    fn try_acquire(&self) -> Option<InFlight<'_>> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight { gate: self })
    }
}

/// Releases the gate when the submission settles, including on cancellation.
struct InFlight<'a> {
    gate: &'a SubmissionGate,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.gate.pending.store(false, Ordering::Release);
    }
}

/// Domain service: turns a valid form into exactly one submission attempt.
#[derive(Clone)]
pub struct RegistrationService {
    port: Arc<dyn SubmissionPort>,
    config: ServiceConfig,
}

impl std::fmt::Debug for RegistrationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RegistrationService {
    #[must_use]
    pub fn new(port: Arc<dyn SubmissionPort>, config: ServiceConfig) -> Self {
        Self { port, config }
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// A fresh, empty form using the configured password policy.
    #[must_use]
    pub fn new_form(&self) -> RegistrationForm {
        RegistrationForm::standard(self.config.password_min_length)
    }

    /// Submit the form's current values once.
    ///
    /// Resolves to the status to display. Transport and server failures are
    /// statuses, not errors.
    ///
    /// # Errors
    /// - [`DomainError::Validation`] if any field is invalid; nothing is sent.
    /// - [`DomainError::SubmissionInFlight`] if `gate` already has a pending submission.
    #[instrument(skip_all)]
    pub async fn submit(
        &self,
        gate: &SubmissionGate,
        form: &RegistrationForm,
    ) -> Result<SubmissionStatus, DomainError> {
        if let Some((field, message)) = form.first_violation() {
            debug!(%field, "submission blocked by invalid field");
            return Err(DomainError::validation(field, message));
        }

        let Some(_in_flight) = gate.try_acquire() else {
            warn!("submission rejected: another one is in flight");
            return Err(DomainError::SubmissionInFlight);
        };

        let body = form.request_body();
        info!("submitting registration");

        let status = match self.port.submit(&body).await {
            Ok(()) => {
                info!("registration accepted");
                SubmissionStatus::succeeded(self.config.success_message.clone())
            }
            Err(e) => self.failure_status(&e),
        };
        Ok(status)
    }

    /// Validate a complete input and submit it, for callers without a form.
    ///
    /// # Errors
    /// Same as [`RegistrationService::submit`].
    pub async fn register(
        &self,
        input: &RegistrationInput,
    ) -> Result<SubmissionStatus, DomainError> {
        let mut form = self.new_form();
        form.fill(input);
        self.submit(&SubmissionGate::default(), &form).await
    }

    fn failure_status(&self, error: &SubmissionError) -> SubmissionStatus {
        match error {
            SubmissionError::Rejected { status, message } => {
                warn!(
                    status,
                    has_message = message.is_some(),
                    "registration rejected"
                );
            }
            SubmissionError::Transport(reason) => {
                warn!(error = %reason, "registration request failed");
            }
        }
        let message = error
            .server_message()
            .unwrap_or(&self.config.fallback_error_message);
        SubmissionStatus::failed(message)
    }
}
