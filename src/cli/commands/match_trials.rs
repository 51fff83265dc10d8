//! Match command implementation
//!
//! Runs one lookup per patient bundle file, concurrently, and prints each
//! resulting search set as JSON on stdout.

use crate::adapters::enrichment::{ClinicalTrialsGovEnricher, StudyEnricher};
use crate::config::{load_config, TrialMatchConfig};
use crate::core::lookup::{create_lookup, TrialLookup};
use crate::domain::{PatientBundle, Result, SearchSet};
use clap::Args;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the match command
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Patient bundle JSON files
    #[arg(required = true, value_name = "BUNDLE")]
    pub bundles: Vec<PathBuf>,

    /// Print compact JSON instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}

impl MatchArgs {
    /// Execute the match command
    ///
    /// Exit codes: 0 when every lookup succeeded, 1 when at least one
    /// failed, 2 on configuration errors.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(bundles = self.bundles.len(), "Starting match command");

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let lookup = match build_lookup(&config) {
            Ok(lookup) => lookup,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let outcomes = join_all(
            self.bundles
                .iter()
                .map(|path| run_lookup(&lookup, path)),
        )
        .await;

        let mut failed = 0usize;
        for (path, outcome) in self.bundles.iter().zip(outcomes) {
            match outcome {
                Ok(results) => {
                    let json = if self.compact {
                        serde_json::to_string(&results)?
                    } else {
                        serde_json::to_string_pretty(&results)?
                    };
                    println!("{json}");
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!(bundle = %path.display(), error = %e, "Lookup failed");
                    eprintln!("❌ {}: {e}", path.display());
                }
            }
        }

        tracing::info!(
            total = self.bundles.len(),
            failed = failed,
            "Match command completed"
        );

        Ok(if failed == 0 { 0 } else { 1 })
    }
}

fn build_lookup(config: &TrialMatchConfig) -> Result<TrialLookup> {
    let enricher: Option<Arc<dyn StudyEnricher>> = if config.enrichment.enabled {
        Some(Arc::new(ClinicalTrialsGovEnricher::new(&config.enrichment)?))
    } else {
        None
    };

    create_lookup(&config.backend, enricher)
}

async fn run_lookup(lookup: &TrialLookup, path: &Path) -> Result<SearchSet> {
    let bundle = read_bundle(path).await?;
    lookup.lookup(&bundle).await
}

/// Reads and parses a patient bundle file
pub async fn read_bundle(path: &Path) -> Result<PatientBundle> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use crate::domain::TrialMatchError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_read_bundle() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"resourceType":"Bundle","type":"collection","entry":[{{"resource":{{"resourceType":"Patient"}}}}]}}"#
        )
        .unwrap();

        let bundle = read_bundle(file.path()).await.unwrap();
        assert_eq!(bundle.entry.len(), 1);
    }

    #[tokio::test]
    async fn test_read_bundle_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = read_bundle(file.path()).await.unwrap_err();
        assert!(matches!(err, TrialMatchError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_read_bundle_missing_file() {
        let err = read_bundle(Path::new("/nonexistent/bundle.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, TrialMatchError::Io(_)));
    }

    #[test]
    fn test_build_lookup_without_enrichment() {
        let config = TrialMatchConfig {
            backend: BackendConfig::new("https://matcher.example.com/match", "token"),
            ..Default::default()
        };
        assert!(build_lookup(&config).is_ok());
    }

    #[test]
    fn test_build_lookup_reports_missing_endpoint() {
        let err = build_lookup(&TrialMatchConfig::default()).err().unwrap();
        assert_eq!(err.to_string(), "Missing endpoint in configuration");
    }

    #[tokio::test]
    async fn test_execute_missing_config_is_configuration_error() {
        let args = MatchArgs {
            bundles: vec![PathBuf::from("patient.json")],
            compact: false,
        };
        let code = args.execute("/nonexistent/trialmatch.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
