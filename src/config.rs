//! Configuration for reaching the workspace.
//!
//! Everything is read from environment variables, the same ones the standard
//! workspace tooling uses:
//!
//! - `DATABRICKS_HOST`: workspace URL - **required**
//! - `DATABRICKS_TOKEN`: personal access token - **required**
//! - `REGDOCTOR_REQUEST_TIMEOUT`: per-request timeout in seconds - default: "60"
//!
//! A host without a scheme gets `https://` prepended; a trailing slash is
//! dropped so paths can be appended directly.

use std::env;
use std::fmt;

use thiserror::Error;

pub const ENV_HOST: &str = "DATABRICKS_HOST";
pub const ENV_TOKEN: &str = "DATABRICKS_TOKEN";
pub const ENV_REQUEST_TIMEOUT: &str = "REGDOCTOR_REQUEST_TIMEOUT";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Workspace host not configured
    #[error("Workspace host not set. Set the DATABRICKS_HOST environment variable to your workspace URL")]
    MissingHost,

    /// Workspace token not configured
    #[error("Workspace token not set. Set the DATABRICKS_TOKEN environment variable to a personal access token")]
    MissingToken,

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Connection settings for one workspace.
#[derive(Clone)]
pub struct WorkspaceConfig {
    /// Workspace base URL, normalized to `https://host` with no trailing slash
    pub host: String,

    /// Personal access token used as the bearer credential
    pub token: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl WorkspaceConfig {
    /// Loads the configuration from environment variables.
    ///
    /// Blank values count as unset. An unparsable timeout falls back to the
    /// default rather than failing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var(ENV_HOST)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingHost)?;

        let token = env::var(ENV_TOKEN)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let request_timeout_secs = env::var(ENV_REQUEST_TIMEOUT)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self {
            host: normalize_host(&host),
            token,
            request_timeout_secs,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if the timeout is outside the
    /// accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }
        Ok(())
    }
}

fn normalize_host(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn mask_token(value: &str) -> String {
    let len = value.len();
    if len <= 8 {
        "*".repeat(len)
    } else {
        format!("{}...{}", &value[..4], &value[len - 4..])
    }
}

impl fmt::Debug for WorkspaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceConfig")
            .field("host", &self.host)
            .field("token", &mask_token(&self.token))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl fmt::Display for WorkspaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Workspace Configuration:")?;
        writeln!(f, "  Host: {}", self.host)?;
        writeln!(f, "  Token: {}", mask_token(&self.token))?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper to temporarily set or unset environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn sample_config() -> WorkspaceConfig {
        WorkspaceConfig {
            host: "https://example.cloud.databricks.com".to_string(),
            token: "dapi0123456789abcdef".to_string(),
            request_timeout_secs: 60,
        }
    }

    #[test]
    #[serial]
    fn test_from_env_reads_all_variables() {
        let _guards = vec![
            EnvGuard::set(ENV_HOST, "https://example.cloud.databricks.com"),
            EnvGuard::set(ENV_TOKEN, "dapi0123456789abcdef"),
            EnvGuard::set(ENV_REQUEST_TIMEOUT, "30"),
        ];

        let config = WorkspaceConfig::from_env().unwrap();
        assert_eq!(config.host, "https://example.cloud.databricks.com");
        assert_eq!(config.token, "dapi0123456789abcdef");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    #[serial]
    fn test_missing_host_is_an_error() {
        let _guards = vec![
            EnvGuard::unset(ENV_HOST),
            EnvGuard::set(ENV_TOKEN, "dapi0123456789abcdef"),
        ];

        let err = WorkspaceConfig::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_HOST));
    }

    #[test]
    #[serial]
    fn test_missing_token_is_an_error() {
        let _guards = vec![
            EnvGuard::set(ENV_HOST, "https://example.cloud.databricks.com"),
            EnvGuard::unset(ENV_TOKEN),
        ];

        let err = WorkspaceConfig::from_env().unwrap_err();
        assert!(err.to_string().contains(ENV_TOKEN));
    }

    #[test]
    #[serial]
    fn test_blank_values_count_as_missing() {
        let _guards = vec![
            EnvGuard::set(ENV_HOST, "   "),
            EnvGuard::set(ENV_TOKEN, "dapi0123456789abcdef"),
        ];

        assert!(matches!(
            WorkspaceConfig::from_env(),
            Err(ConfigError::MissingHost)
        ));
    }

    #[test]
    #[serial]
    fn test_host_gains_scheme_and_loses_trailing_slash() {
        let _guards = vec![
            EnvGuard::set(ENV_HOST, "example.cloud.databricks.com/"),
            EnvGuard::set(ENV_TOKEN, "dapi0123456789abcdef"),
            EnvGuard::unset(ENV_REQUEST_TIMEOUT),
        ];

        let config = WorkspaceConfig::from_env().unwrap();
        assert_eq!(config.host, "https://example.cloud.databricks.com");
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    #[serial]
    fn test_unparsable_timeout_falls_back_to_default() {
        let _guards = vec![
            EnvGuard::set(ENV_HOST, "https://example.cloud.databricks.com"),
            EnvGuard::set(ENV_TOKEN, "dapi0123456789abcdef"),
            EnvGuard::set(ENV_REQUEST_TIMEOUT, "soon"),
        ];

        let config = WorkspaceConfig::from_env().unwrap();
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut config = sample_config();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_excessive_timeout() {
        let mut config = sample_config();
        config.request_timeout_secs = 601;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_defaults() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn test_debug_and_display_mask_token() {
        let config = sample_config();
        let debug = format!("{config:?}");
        let display = format!("{config}");
        assert!(!debug.contains("dapi0123456789abcdef"));
        assert!(!display.contains("dapi0123456789abcdef"));
        assert!(debug.contains("dapi...cdef"));
        assert!(display.contains("Workspace Configuration:"));
    }

    #[test]
    fn test_mask_token_short_values_fully_hidden() {
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token(""), "");
        assert_eq!(mask_token("dapi0123456789abcdef"), "dapi...cdef");
    }
}
