//! Minimal JSON-over-HTTPS client used by the submission adapter.

use std::time::Duration;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue, USER_AGENT};
use http::{Method, Request, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use serde::Serialize;

use super::error::HttpError;
use super::tls;
use crate::config::{RegistrationConfig, TlsRoots};

/// Whether plain `http://` URLs are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransportSecurity {
    #[default]
    TlsOnly,
    AllowInsecureHttp,
}

/// Status and body of a completed exchange.
///
/// The body is only collected for non-success statuses, bounded by
/// `max_body_size`; it is empty for 2xx responses.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// HTTP client settings taken from [`RegistrationConfig`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub request_timeout: Duration,
    pub user_agent: String,
    pub max_body_size: usize,
    pub tls_roots: TlsRoots,
    pub transport: TransportSecurity,
}

impl From<&RegistrationConfig> for TransportConfig {
    fn from(config: &RegistrationConfig) -> Self {
        Self {
            request_timeout: config.request_timeout,
            user_agent: config.user_agent.clone(),
            max_body_size: config.max_error_body_size,
            tls_roots: config.tls_roots,
            transport: if config.allow_insecure_http {
                TransportSecurity::AllowInsecureHttp
            } else {
                TransportSecurity::TlsOnly
            },
        }
    }
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    user_agent: HeaderValue,
    config: TransportConfig,
}

impl HttpTransport {
    /// Build the pooled client.
    ///
    /// # Errors
    /// Returns `HttpError::Tls` when the requested root store is unusable and
    /// `HttpError::InvalidHeaderValue` for a malformed user agent.
    pub fn new(config: TransportConfig) -> Result<Self, HttpError> {
        if config.transport == TransportSecurity::AllowInsecureHttp {
            tracing::warn!("insecure HTTP enabled; use only for testing with mock servers");
        }

        let user_agent = HeaderValue::from_str(&config.user_agent)?;
        let https = build_https_connector(config.tls_roots, config.transport)?;

        let mut builder = Client::builder(TokioExecutor::new());
        builder.pool_timer(TokioTimer::new()).http2_only(false);
        let client = builder.build::<_, Full<Bytes>>(https);

        Ok(Self {
            client,
            user_agent,
            config,
        })
    }

    /// POST `body` as JSON and read the response.
    ///
    /// Any status is returned as a response; only transport problems are
    /// errors. The body of a success response is discarded unread, so its size
    /// never matters. The whole exchange is bounded by the request timeout.
    ///
    /// # Errors
    /// Returns `HttpError` for URL, transport, TLS, timeout and body-size failures.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<TransportResponse, HttpError> {
        let uri = validate_url(url, self.config.transport)?;
        let payload = serde_json::to_vec(body)?;

        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, self.user_agent.clone())
            .body(Full::new(Bytes::from(payload)))?;

        let timeout = self.config.request_timeout;
        tokio::time::timeout(timeout, self.exchange(request))
            .await
            .map_err(|_| HttpError::Timeout(timeout))?
    }

    async fn exchange(&self, request: Request<Full<Bytes>>) -> Result<TransportResponse, HttpError> {
        let response = self.client.request(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(TransportResponse {
                status,
                body: Bytes::new(),
            });
        }
        let body = read_body_limited(response.into_body(), self.config.max_body_size).await?;
        Ok(TransportResponse { status, body })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Parse an absolute URL and check its scheme against the security mode.
///
/// # Errors
/// Returns `HttpError::InvalidUri` or `HttpError::InvalidScheme`.
pub fn validate_url(url: &str, transport: TransportSecurity) -> Result<http::Uri, HttpError> {
    let uri: http::Uri = url
        .parse()
        .map_err(|e: http::uri::InvalidUri| HttpError::InvalidUri {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

    if uri.authority().is_none() {
        return Err(HttpError::InvalidUri {
            url: url.to_owned(),
            reason: "missing host/authority".to_owned(),
        });
    }

    match uri.scheme_str() {
        Some("https") => Ok(uri),
        Some("http") => match transport {
            TransportSecurity::AllowInsecureHttp => Ok(uri),
            TransportSecurity::TlsOnly => Err(HttpError::InvalidScheme {
                scheme: "http".to_owned(),
                reason: "HTTPS required unless insecure HTTP is allowed".to_owned(),
            }),
        },
        Some(scheme) => Err(HttpError::InvalidScheme {
            scheme: scheme.to_owned(),
            reason: "only http:// and https:// schemes are supported".to_owned(),
        }),
        None => Err(HttpError::InvalidUri {
            url: url.to_owned(),
            reason: "missing scheme".to_owned(),
        }),
    }
}

/// Collect a body, failing once more than `limit` bytes have arrived.
async fn read_body_limited(body: Incoming, limit: usize) -> Result<Bytes, HttpError> {
    let mut collected = Vec::new();
    let mut body = std::pin::pin!(body);

    while let Some(frame) = body.frame().await {
        let frame = frame?;
        if let Some(chunk) = frame.data_ref() {
            if collected.len() + chunk.len() > limit {
                return Err(HttpError::BodyTooLarge {
                    limit,
                    actual: collected.len() + chunk.len(),
                });
            }
            collected.extend_from_slice(chunk);
        }
    }

    Ok(Bytes::from(collected))
}

fn build_https_connector(
    tls_roots: TlsRoots,
    transport: TransportSecurity,
) -> Result<HttpsConnector<HttpConnector>, HttpError> {
    let allow_http = transport == TransportSecurity::AllowInsecureHttp;

    match tls_roots {
        TlsRoots::Webpki => {
            let builder = hyper_rustls::HttpsConnectorBuilder::new()
                .with_provider_and_webpki_roots(tls::crypto_provider())
                .map_err(|e| HttpError::Tls(Box::new(e)))?;
            Ok(if allow_http {
                builder.https_or_http().enable_all_versions().build()
            } else {
                builder.https_only().enable_all_versions().build()
            })
        }
        TlsRoots::Native => {
            let client_config =
                tls::native_roots_client_config().map_err(|e| HttpError::Tls(e.into()))?;
            let builder = hyper_rustls::HttpsConnectorBuilder::new().with_tls_config(client_config);
            Ok(if allow_http {
                builder.https_or_http().enable_all_versions().build()
            } else {
                builder.https_only().enable_all_versions().build()
            })
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn https_urls_are_accepted() {
        let uri = validate_url("https://3.221.159.196:3320/auth/cadastrar", TransportSecurity::TlsOnly)
            .unwrap();
        assert_eq!(uri.path(), "/auth/cadastrar");
    }

    #[test]
    fn http_requires_insecure_mode() {
        let err = validate_url("http://localhost:8080/x", TransportSecurity::TlsOnly).unwrap_err();
        assert!(matches!(err, HttpError::InvalidScheme { ref scheme, .. } if scheme == "http"));

        assert!(validate_url("http://localhost:8080/x", TransportSecurity::AllowInsecureHttp).is_ok());
    }

    #[test]
    fn relative_and_foreign_urls_are_rejected() {
        assert!(matches!(
            validate_url("/auth/cadastrar", TransportSecurity::TlsOnly),
            Err(HttpError::InvalidUri { .. })
        ));
        assert!(matches!(
            validate_url("ftp://example.com/x", TransportSecurity::AllowInsecureHttp),
            Err(HttpError::InvalidScheme { .. })
        ));
        assert!(matches!(
            validate_url("not a url", TransportSecurity::TlsOnly),
            Err(HttpError::InvalidUri { .. })
        ));
    }

    #[test]
    fn transport_config_follows_registration_config() {
        let config = RegistrationConfig {
            allow_insecure_http: true,
            max_error_body_size: 64,
            ..RegistrationConfig::default()
        };
        let transport = TransportConfig::from(&config);

        assert_eq!(transport.transport, TransportSecurity::AllowInsecureHttp);
        assert_eq!(transport.max_body_size, 64);
        assert_eq!(transport.request_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn webpki_transport_builds() {
        let transport = HttpTransport::new(TransportConfig::from(&RegistrationConfig::default()));
        assert!(transport.is_ok());
    }
}
