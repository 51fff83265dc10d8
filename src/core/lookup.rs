//! Lookup surface
//!
//! [`create_lookup`] validates configuration up front and returns a
//! [`TrialLookup`] that can be cloned and shared across tasks.

use crate::adapters::enrichment::{NoopEnricher, StudyEnricher};
use crate::adapters::matching::MatchingServiceClient;
use crate::config::BackendConfig;
use crate::core::diagnostics::ConversionDiagnostics;
use crate::core::query::TrialQuery;
use crate::domain::{PatientBundle, Result, SearchSet};
use crate::{log_lookup_complete, log_lookup_start};
use std::sync::Arc;
use std::time::Instant;

/// Reusable handle that turns patient bundles into matching studies
///
/// Holds an immutable client and enricher; concurrent calls to
/// [`TrialLookup::lookup`] share nothing mutable.
#[derive(Clone)]
pub struct TrialLookup {
    client: MatchingServiceClient,
    enricher: Arc<dyn StudyEnricher>,
}

impl TrialLookup {
    /// Replace the sink that receives skipped-identifier notices
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn ConversionDiagnostics>) -> Self {
        self.client = self.client.with_diagnostics(diagnostics);
        self
    }

    /// Get the matching service endpoint
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Builds a query from `bundle`, sends it, and converts the response
    ///
    /// # Errors
    ///
    /// Returns the dispatcher's [`BackendError`](crate::domain::BackendError)
    /// variants or the enricher's error unchanged.
    pub async fn lookup(&self, bundle: &PatientBundle) -> Result<SearchSet> {
        let start = Instant::now();
        log_lookup_start!(self.client.endpoint(), bundle.entry.len());

        let query = TrialQuery::from_bundle(bundle);
        let results = self.client.dispatch(&query, self.enricher.as_ref()).await?;

        log_lookup_complete!(results.total, start.elapsed());
        Ok(results)
    }
}

/// Creates a lookup for the matching service described by `config`
///
/// `enricher` defaults to [`NoopEnricher`].
///
/// # Errors
///
/// Returns [`TrialMatchError::Configuration`](crate::domain::TrialMatchError::Configuration)
/// with `Missing endpoint in configuration` or
/// `Missing auth_token in configuration`. The endpoint is checked first.
///
/// # Example
///
/// ```no_run
/// use trialmatch::config::BackendConfig;
/// use trialmatch::core::lookup::create_lookup;
/// use trialmatch::domain::PatientBundle;
///
/// # async fn example() -> trialmatch::domain::Result<()> {
/// let config = BackendConfig::new("https://matcher.example.com/match", "token");
/// let lookup = create_lookup(&config, None)?;
///
/// let results = lookup.lookup(&PatientBundle::from_resources(Vec::new())).await?;
/// for study in results.studies() {
///     println!("{:?}", study.trial_identifier());
/// }
/// # Ok(())
/// # }
/// ```
pub fn create_lookup(
    config: &BackendConfig,
    enricher: Option<Arc<dyn StudyEnricher>>,
) -> Result<TrialLookup> {
    let client = MatchingServiceClient::new(config)?;
    let enricher = enricher.unwrap_or_else(|| Arc::new(NoopEnricher));

    Ok(TrialLookup { client, enricher })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::TrialMatchError;

    #[test]
    fn test_create_lookup() {
        let config = BackendConfig::new("https://matcher.example.com/match", "token");
        let lookup = create_lookup(&config, None).unwrap();
        assert_eq!(lookup.endpoint(), "https://matcher.example.com/match");
    }

    #[test]
    fn test_create_lookup_missing_endpoint() {
        let config = BackendConfig {
            auth_token: Some(secret_string("token".to_string())),
            ..Default::default()
        };

        let err = create_lookup(&config, None).err().unwrap();
        assert!(matches!(err, TrialMatchError::Configuration(_)));
        assert_eq!(err.to_string(), "Missing endpoint in configuration");
    }

    #[test]
    fn test_create_lookup_missing_token() {
        let config = BackendConfig {
            endpoint: Some("https://matcher.example.com/match".to_string()),
            ..Default::default()
        };

        let err = create_lookup(&config, None).err().unwrap();
        assert_eq!(err.to_string(), "Missing auth_token in configuration");
    }

    #[test]
    fn test_create_lookup_empty_token() {
        let config = BackendConfig::new("https://matcher.example.com/match", "");

        let err = create_lookup(&config, None).err().unwrap();
        assert_eq!(err.to_string(), "Missing auth_token in configuration");
    }

    #[test]
    fn test_lookup_is_cloneable() {
        let config = BackendConfig::new("https://matcher.example.com/match", "token");
        let lookup = create_lookup(&config, Some(Arc::new(NoopEnricher))).unwrap();
        let copy = lookup.clone();
        assert_eq!(copy.endpoint(), lookup.endpoint());
    }
}
