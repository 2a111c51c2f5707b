use async_trait::async_trait;
use registration_sdk::NewRegistration;

use crate::domain::error::SubmissionError;

/// Output port: delivers a registration request to the remote service.
///
/// Resolves to `Ok(())` on a 2xx answer. Implementations perform exactly one
/// attempt per call.
#[async_trait]
pub trait SubmissionPort: Send + Sync {
    async fn submit(&self, body: &NewRegistration) -> Result<(), SubmissionError>;
}
