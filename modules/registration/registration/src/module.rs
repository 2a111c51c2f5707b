use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, info};

use registration_sdk::{NewRegistration, RegistrationClientV1};

use crate::config::RegistrationConfig;
use crate::domain::error::SubmissionError;
use crate::domain::ports::SubmissionPort;
use crate::domain::service::{RegistrationService, ServiceConfig};
use crate::domain::session::RegistrationSession;
use crate::infra::HttpSubmissionClient;
use crate::infra::http::{HttpTransport, TransportConfig};
use crate::local_client::RegistrationLocalClient;

/// Composition root: wires configuration, the HTTP adapter and the domain service.
#[derive(Debug, Clone)]
pub struct RegistrationModule {
    service: Arc<RegistrationService>,
}

impl RegistrationModule {
    /// Build the module from configuration.
    ///
    /// # Errors
    /// Fails on invalid configuration or when the HTTPS client cannot be built.
    pub fn new(config: &RegistrationConfig) -> anyhow::Result<Self> {
        info!("Initializing registration module");
        config.validate().context("invalid registration config")?;

        let endpoint = config.endpoint()?;
        debug!(
            endpoint = %endpoint,
            timeout = ?config.request_timeout,
            tls_roots = ?config.tls_roots,
            "Loaded registration config"
        );

        let transport = HttpTransport::new(TransportConfig::from(config))
            .context("failed to build HTTP client")?;
        let port: Arc<dyn SubmissionPort> =
            Arc::new(HttpSubmissionClient::new(transport, endpoint));

        Ok(Self::with_port(port, config))
    }

    /// Build the module around an existing submission port.
    #[must_use]
    pub fn with_port(port: Arc<dyn SubmissionPort>, config: &RegistrationConfig) -> Self {
        let service_config = ServiceConfig {
            password_min_length: config.password_min_length,
            success_message: config.success_message.clone(),
            fallback_error_message: config.fallback_error_message.clone(),
        };
        Self {
            service: Arc::new(RegistrationService::new(port, service_config)),
        }
    }

    /// Build the module for local validation only.
    ///
    /// Neither the endpoint nor the HTTP client is checked or built; a
    /// submission through this module fails with a transport error.
    #[must_use]
    pub fn offline(config: &RegistrationConfig) -> Self {
        Self::with_port(Arc::new(OfflinePort), config)
    }

    /// A new interactive registration with an empty form.
    #[must_use]
    pub fn session(&self) -> RegistrationSession {
        RegistrationSession::new(Arc::clone(&self.service))
    }

    /// One-shot client for headless callers.
    #[must_use]
    pub fn client(&self) -> Arc<dyn RegistrationClientV1> {
        Arc::new(RegistrationLocalClient::new(Arc::clone(&self.service)))
    }
}

/// Port for modules built without a transport.
struct OfflinePort;

#[async_trait]
impl SubmissionPort for OfflinePort {
    async fn submit(&self, _body: &NewRegistration) -> Result<(), SubmissionError> {
        Err(SubmissionError::transport("no transport configured"))
    }
}
