//! Local implementation of `RegistrationClientV1`.
//!
//! Delegates to the domain service and converts errors to SDK error types.

use std::sync::Arc;

use async_trait::async_trait;
use registration_sdk::{
    RegistrationClientV1, RegistrationError, RegistrationInput, SubmissionStatus,
};

use crate::domain::service::RegistrationService;

pub struct RegistrationLocalClient {
    service: Arc<RegistrationService>,
}

impl RegistrationLocalClient {
    #[must_use]
    pub fn new(service: Arc<RegistrationService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RegistrationClientV1 for RegistrationLocalClient {
    async fn register(
        &self,
        input: RegistrationInput,
    ) -> Result<SubmissionStatus, RegistrationError> {
        self.service.register(&input).await.map_err(Into::into)
    }
}
