//! `RegistrationClientV1` trait definition.

use async_trait::async_trait;

use crate::errors::RegistrationError;
use crate::models::{RegistrationInput, SubmissionStatus};

/// Public client trait for the `registration` module.
///
/// Headless callers hand over a complete [`RegistrationInput`]; the module
/// validates all five fields and submits only when every field is valid.
///
/// ```ignore
/// let client: Arc<dyn RegistrationClientV1> = module.client();
/// let status = client.register(input).await?;
/// ```
#[async_trait]
pub trait RegistrationClientV1: Send + Sync {
    /// Validate and submit a registration.
    ///
    /// A server-side rejection is not an error: it resolves to a
    /// [`SubmissionStatus`] with `failed == true` and the message to display.
    /// Each call validates and submits its own input, so concurrent calls do
    /// not block one another.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::Validation`] when a field violates its rules
    async fn register(
        &self,
        input: RegistrationInput,
    ) -> Result<SubmissionStatus, RegistrationError>;
}
