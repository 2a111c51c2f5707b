use async_trait::async_trait;
use registration_sdk::NewRegistration;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::domain::error::SubmissionError;
use crate::domain::ports::SubmissionPort;
use crate::infra::http::HttpTransport;

/// HTTP adapter implementing the `SubmissionPort`.
///
/// Posts the request body to a single endpoint. `HttpTransport` is
/// `Clone + Send + Sync`, so no external locking is needed.
#[derive(Debug)]
pub struct HttpSubmissionClient {
    transport: HttpTransport,
    endpoint: Url,
}

impl HttpSubmissionClient {
    #[must_use]
    pub fn new(transport: HttpTransport, endpoint: Url) -> Self {
        Self {
            transport,
            endpoint,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionPort for HttpSubmissionClient {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn submit(&self, body: &NewRegistration) -> Result<(), SubmissionError> {
        let response = self
            .transport
            .post_json(self.endpoint.as_str(), body)
            .await
            .map_err(|e| SubmissionError::transport(e.to_string()))?;

        if response.status.is_success() {
            return Ok(());
        }

        Err(SubmissionError::rejected(
            response.status.as_u16(),
            error_message(&response.body),
        ))
    }
}

/// Error payload returned by the registration service.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<ErrorMessage>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    Text(String),
    List(Vec<String>),
}

/// Extract the user-facing message from a failure body.
///
/// Accepts `message` as a string or as a list of strings (joined with `"; "`).
/// Anything else, including blank text, yields `None`.
fn error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let message = match parsed.message? {
        ErrorMessage::Text(text) => text,
        ErrorMessage::List(items) => items.join("; "),
    };
    (!message.trim().is_empty()).then_some(message)
}
