//! Configuration for the registration module.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

/// Default User-Agent string for registration requests
pub const DEFAULT_USER_AGENT: &str = concat!("registration/", env!("CARGO_PKG_VERSION"));

/// Which root certificates the HTTPS connector trusts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsRoots {
    /// Mozilla's root certificates (webpki-roots, no OS dependency)
    #[default]
    Webpki,
    /// OS native root certificate store
    Native,
}

/// Registration module configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrationConfig {
    /// Base URL of the registration service.
    pub base_url: String,

    /// Path of the registration resource, relative to `base_url`.
    pub register_path: String,

    /// Per-request timeout for the submission call.
    #[serde(
        serialize_with = "serialize_duration",
        deserialize_with = "deserialize_duration"
    )]
    pub request_timeout: Duration,

    /// Allow plain `http://` endpoints (mock servers, local development).
    pub allow_insecure_http: bool,

    pub tls_roots: TlsRoots,

    pub user_agent: String,

    /// Upper bound on the error body read when a submission is rejected.
    pub max_error_body_size: usize,

    /// Minimum password length, counted in characters.
    pub password_min_length: usize,

    /// Status shown after a successful submission.
    pub success_message: String,

    /// Status shown when a failure carries no usable message.
    pub fallback_error_message: String,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://3.221.159.196:3320".to_owned(),
            register_path: "auth/cadastrar".to_owned(),
            request_timeout: Duration::from_secs(30),
            allow_insecure_http: false,
            tls_roots: TlsRoots::default(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_error_body_size: 8 * 1024,
            password_min_length: 8,
            success_message: "Registration completed successfully".to_owned(),
            fallback_error_message: "Registration failed. Please try again.".to_owned(),
        }
    }
}

/// Configuration problems detected before any request is made.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base_url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("URL scheme '{scheme}' not allowed: {reason}")]
    SchemeNotAllowed { scheme: String, reason: String },

    #[error("request_timeout must be greater than zero")]
    ZeroTimeout,

    #[error("password_min_length must be at least 1")]
    ZeroPasswordLength,
}

impl RegistrationConfig {
    /// Resolve the absolute registration endpoint.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] if `base_url` cannot be parsed
    /// or cannot carry a path.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        {
            let mut segments =
                url.path_segments_mut()
                    .map_err(|()| ConfigError::InvalidBaseUrl {
                        url: self.base_url.clone(),
                        reason: "URL cannot be a base".to_owned(),
                    })?;
            segments.pop_if_empty();
            segments.extend(self.register_path.split('/').filter(|s| !s.is_empty()));
        }

        Ok(url)
    }

    /// Check the configuration for values that would fail at submit time.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint()?;
        match endpoint.scheme() {
            "https" => {}
            "http" if self.allow_insecure_http => {}
            "http" => {
                return Err(ConfigError::SchemeNotAllowed {
                    scheme: "http".to_owned(),
                    reason: "HTTPS required unless allow_insecure_http is set".to_owned(),
                });
            }
            other => {
                return Err(ConfigError::SchemeNotAllowed {
                    scheme: other.to_owned(),
                    reason: "only http:// and https:// schemes are supported".to_owned(),
                });
            }
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.password_min_length == 0 {
            return Err(ConfigError::ZeroPasswordLength);
        }
        Ok(())
    }
}

fn serialize_duration<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&humantime::format_duration(*d).to_string())
}

fn deserialize_duration<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
    let raw = String::deserialize(d)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}
