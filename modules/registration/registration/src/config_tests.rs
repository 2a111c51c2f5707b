//! Tests for configuration parsing.

#[cfg(test)]
mod tests {
    use crate::config::{ConfigError, RegistrationConfig, TlsRoots};
    use std::time::Duration;

    #[test]
    fn test_config_default() {
        let config = RegistrationConfig::default();
        assert_eq!(config.base_url, "https://3.221.159.196:3320");
        assert_eq!(config.register_path, "auth/cadastrar");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.password_min_length, 8);
        assert_eq!(config.tls_roots, TlsRoots::Webpki);
        assert!(!config.allow_insecure_http);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_endpoint_joins_path() {
        let config = RegistrationConfig::default();
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://3.221.159.196:3320/auth/cadastrar"
        );

        let config = RegistrationConfig {
            base_url: "https://api.example.com/v1/".to_owned(),
            register_path: "/auth/cadastrar".to_owned(),
            ..RegistrationConfig::default()
        };
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://api.example.com/v1/auth/cadastrar"
        );
    }

    #[test]
    fn test_config_parse_timeout_from_string() {
        let yaml = r#"
base_url: "http://localhost:8080"
allow_insecure_http: true
request_timeout: "5s"
tls_roots: native
"#;
        let config: RegistrationConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.tls_roots, TlsRoots::Native);
        assert_eq!(config.register_path, "auth/cadastrar"); // default
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_reject_unknown_fields() {
        let yaml = r#"
base_url: "https://example.com"
endpoint: "should fail"
"#;
        let result: Result<RegistrationConfig, _> = serde_saphyr::from_str(yaml);
        assert!(
            result.is_err(),
            "Config should reject unknown fields due to deny_unknown_fields"
        );
    }

    #[test]
    fn test_config_rejects_plain_http_without_opt_in() {
        let config = RegistrationConfig {
            base_url: "http://localhost:8080".to_owned(),
            ..RegistrationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SchemeNotAllowed { .. })
        ));
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let config = RegistrationConfig {
            base_url: "not a url".to_owned(),
            ..RegistrationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));

        let config = RegistrationConfig {
            base_url: "ftp://example.com".to_owned(),
            ..RegistrationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SchemeNotAllowed { .. })
        ));

        let config = RegistrationConfig {
            request_timeout: Duration::ZERO,
            ..RegistrationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        let config = RegistrationConfig {
            password_min_length: 0,
            ..RegistrationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPasswordLength));
    }
}
