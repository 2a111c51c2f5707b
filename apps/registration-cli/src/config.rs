//! Layered configuration: defaults, YAML file, environment, CLI overrides.

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use registration::RegistrationConfig;

/// Prefix of environment variables; `__` separates nested keys.
pub const ENV_PREFIX: &str = "REGISTRATION__";

/// Values given on the command line, applied last.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
}

/// Load the effective configuration.
///
/// # Errors
/// Fails when the file is missing or unparsable, or when a layer holds an
/// unknown key or a value of the wrong type.
pub fn load(path: Option<&Path>, overrides: &CliOverrides) -> Result<RegistrationConfig> {
    let mut figment = Figment::from(Serialized::defaults(RegistrationConfig::default()));

    if let Some(path) = path {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
        figment = figment.merge(Yaml::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    if let Some(base_url) = &overrides.base_url {
        figment = figment.merge(Serialized::default("base_url", base_url));
    }

    let config: RegistrationConfig = figment
        .extract()
        .context("failed to load registration config")?;
    tracing::debug!(base_url = %config.base_url, "configuration loaded");
    Ok(config)
}

/// Render the configuration as YAML.
///
/// # Errors
/// Fails if serialization fails.
pub fn to_yaml(config: &RegistrationConfig) -> Result<String> {
    serde_saphyr::to_string(config).map_err(|e| anyhow::anyhow!("failed to render config: {e}"))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_without_any_layer() {
        temp_env::with_vars_unset(["REGISTRATION__BASE_URL"], || {
            let config = load(None, &CliOverrides::default()).unwrap();
            assert_eq!(config, RegistrationConfig::default());
        });
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let file = yaml_file(
            "base_url: https://register.example.com\nrequest_timeout: 5s\npassword_min_length: 10\n",
        );

        temp_env::with_vars_unset(["REGISTRATION__BASE_URL"], || {
            let config = load(Some(file.path()), &CliOverrides::default()).unwrap();
            assert_eq!(config.base_url, "https://register.example.com");
            assert_eq!(config.request_timeout, Duration::from_secs(5));
            assert_eq!(config.password_min_length, 10);
            assert_eq!(config.register_path, "auth/cadastrar");
        });
    }

    #[test]
    fn env_overrides_yaml_and_cli_overrides_env() {
        let file = yaml_file("base_url: https://from-file.example.com\n");

        temp_env::with_vars(
            [
                ("REGISTRATION__BASE_URL", Some("https://from-env.example.com")),
                ("REGISTRATION__ALLOW_INSECURE_HTTP", Some("true")),
            ],
            || {
                let config = load(Some(file.path()), &CliOverrides::default()).unwrap();
                assert_eq!(config.base_url, "https://from-env.example.com");
                assert!(config.allow_insecure_http);

                let overrides = CliOverrides {
                    base_url: Some("https://from-cli.example.com".to_owned()),
                };
                let config = load(Some(file.path()), &overrides).unwrap();
                assert_eq!(config.base_url, "https://from-cli.example.com");
            },
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = yaml_file("base_uri: https://typo.example.com\n");
        let err = load(Some(file.path()), &CliOverrides::default()).unwrap_err();
        assert!(format!("{err:#}").contains("base_uri"), "{err:#}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/registration.yaml")), &CliOverrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn yaml_output_round_trips_through_the_loader() {
        let config = RegistrationConfig {
            base_url: "https://register.example.com".to_owned(),
            request_timeout: Duration::from_secs(12),
            ..RegistrationConfig::default()
        };
        let file = yaml_file(&to_yaml(&config).unwrap());

        temp_env::with_vars_unset(["REGISTRATION__BASE_URL"], || {
            let loaded = load(Some(file.path()), &CliOverrides::default()).unwrap();
            assert_eq!(loaded, config);
        });
    }
}
