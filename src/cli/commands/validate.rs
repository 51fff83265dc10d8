//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the trialmatch configuration file.

use crate::config::{load_config, TrialMatchConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        for line in summary_lines(&config) {
            println!("{line}");
        }
        println!();
        Ok(0)
    }
}

fn summary_lines(config: &TrialMatchConfig) -> Vec<String> {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!(
            "  Matching Service: {}",
            config.backend.endpoint.as_deref().unwrap_or("<unset>")
        ),
        // The token itself is never printed
        format!(
            "  Auth Token: {}",
            if config.backend.auth_token.is_some() {
                "set"
            } else {
                "unset"
            }
        ),
        format!(
            "  Request Timeout: {}",
            config
                .backend
                .request_timeout_seconds
                .map(|s| format!("{s}s"))
                .unwrap_or_else(|| "none".to_string())
        ),
        format!("  TLS Verify: {}", config.backend.tls_verify),
    ];

    if config.enrichment.enabled {
        lines.push(format!(
            "  Enrichment: ClinicalTrials.gov ({}, max {} concurrent)",
            config.enrichment.base_url, config.enrichment.max_concurrency
        ));
    } else {
        lines.push("  Enrichment: disabled".to_string());
    }

    if config.logging.local_enabled {
        lines.push(format!(
            "  File Logging: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    #[test]
    fn test_summary_hides_token() {
        let config = TrialMatchConfig {
            backend: BackendConfig::new("https://matcher.example.com/match", "super-secret"),
            ..Default::default()
        };

        let summary = summary_lines(&config).join("\n");
        assert!(summary.contains("https://matcher.example.com/match"));
        assert!(summary.contains("Auth Token: set"));
        assert!(summary.contains("Enrichment: disabled"));
        assert!(!summary.contains("super-secret"));
    }

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("/nonexistent/trialmatch.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
