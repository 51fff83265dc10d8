//! Configuration schema types
//!
//! This module defines the configuration structure for trialmatch.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Main trialmatch configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrialMatchConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Matching service connection
    #[serde(default)]
    pub backend: BackendConfig,

    /// ClinicalTrials.gov enrichment
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TrialMatchConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.backend.validate()?;
        self.enrichment.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Matching service configuration
///
/// `endpoint` and `auth_token` are optional at the serde level so that a
/// missing key is reported with a precise message instead of a TOML error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Absolute URL the query is POSTed to
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Static bearer token sent with every request
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub auth_token: Option<SecretString>,

    /// Transport-level request timeout; unset means no timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_seconds: Option<u64>,

    /// TLS certificate verification enabled
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            auth_token: None,
            request_timeout_seconds: None,
            tls_verify: true,
        }
    }
}

impl BackendConfig {
    /// Creates a backend configuration from an endpoint and a token
    pub fn new(endpoint: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            auth_token: Some(crate::config::secret_string(auth_token.into())),
            ..Default::default()
        }
    }

    /// Validates the backend configuration
    ///
    /// # Errors
    ///
    /// Returns `Missing endpoint in configuration` or
    /// `Missing auth_token in configuration` when either value is absent or
    /// blank, and a descriptive message when the endpoint is not an absolute URL.
    pub fn validate(&self) -> Result<(), String> {
        let endpoint = match self.endpoint.as_deref() {
            Some(endpoint) if !endpoint.trim().is_empty() => endpoint,
            _ => return Err("Missing endpoint in configuration".to_string()),
        };

        match &self.auth_token {
            Some(token) if !token.expose_secret().is_blank() => {}
            _ => return Err("Missing auth_token in configuration".to_string()),
        }

        let url = url::Url::parse(endpoint)
            .map_err(|e| format!("Invalid endpoint '{endpoint}' in configuration: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "Invalid endpoint '{endpoint}' in configuration: scheme must be http or https"
            ));
        }

        if self.request_timeout_seconds == Some(0) {
            return Err("backend.request_timeout_seconds must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// ClinicalTrials.gov enrichment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Enrich matched studies with registry data
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the ClinicalTrials.gov API v2
    #[serde(default = "default_enrichment_base_url")]
    pub base_url: String,

    /// Maximum number of registry requests in flight
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_enrichment_base_url(),
            max_concurrency: default_max_concurrency(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl EnrichmentConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid enrichment.base_url '{}': {e}", self.base_url))?;

        if self.max_concurrency == 0 {
            return Err("enrichment.max_concurrency must be greater than 0".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("enrichment.timeout_seconds must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_enrichment_base_url() -> String {
    "https://clinicaltrials.gov/api/v2".to_string()
}

fn default_max_concurrency() -> usize {
    4
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_local_path() -> String {
    "/var/log/trialmatch".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_backend_config_valid() {
        let config = BackendConfig::new("https://matcher.example.com/match", "token");
        assert!(config.validate().is_ok());
        assert!(config.tls_verify);
        assert_eq!(config.request_timeout_seconds, None);
    }

    #[test]
    fn test_backend_config_missing_endpoint() {
        let config = BackendConfig {
            auth_token: Some(secret_string("token".to_string())),
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            "Missing endpoint in configuration"
        );
    }

    #[test]
    fn test_backend_config_blank_endpoint() {
        let config = BackendConfig::new("  ", "token");
        assert_eq!(
            config.validate().unwrap_err(),
            "Missing endpoint in configuration"
        );
    }

    #[test]
    fn test_backend_config_missing_token() {
        let config = BackendConfig {
            endpoint: Some("https://matcher.example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            "Missing auth_token in configuration"
        );
    }

    #[test]
    fn test_backend_config_endpoint_checked_before_token() {
        let config = BackendConfig::default();
        assert_eq!(
            config.validate().unwrap_err(),
            "Missing endpoint in configuration"
        );
    }

    #[test]
    fn test_backend_config_relative_endpoint() {
        let config = BackendConfig::new("/match", "token");
        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid endpoint"));
    }

    #[test]
    fn test_backend_config_non_http_scheme() {
        let config = BackendConfig::new("ftp://matcher.example.com", "token");
        assert!(config.validate().unwrap_err().contains("scheme"));
    }

    #[test]
    fn test_enrichment_disabled_skips_validation() {
        let config = EnrichmentConfig {
            enabled: false,
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enrichment_zero_concurrency() {
        let config = EnrichmentConfig {
            enabled: true,
            max_concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let config = ApplicationConfig {
            log_level: "verbose".to_string(),
        };
        assert!(config.validate().unwrap_err().contains("Invalid log_level"));
    }

    #[test]
    fn test_invalid_rotation() {
        let config = LoggingConfig {
            local_rotation: "weekly".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: TrialMatchConfig = toml::from_str(
            r#"
[backend]
endpoint = "https://matcher.example.com/match"
auth_token = "abc"
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "info");
        assert!(!config.enrichment.enabled);
        assert_eq!(config.enrichment.base_url, "https://clinicaltrials.gov/api/v2");
        assert!(!config.logging.local_enabled);
    }
}
