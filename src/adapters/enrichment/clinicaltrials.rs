//! ClinicalTrials.gov enricher
//!
//! Looks up every study with an NCT registry number through the
//! ClinicalTrials.gov API v2 and copies title, summary, status, phase,
//! conditions and keywords onto it.

use super::models::{map_overall_status, map_phases, CtGovStudy};
use super::StudyEnricher;
use crate::adapters::matching::client::read_error_body;
use crate::config::EnrichmentConfig;
use crate::domain::{CodeableConcept, ResearchStudy, Result, TrialMatchError};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use regex::Regex;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;

/// Enricher backed by the ClinicalTrials.gov registry
///
/// Registry requests run concurrently, at most `max_concurrency` at a time.
/// Studies the registry does not know (HTTP 404) are left unchanged.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use trialmatch::adapters::enrichment::ClinicalTrialsGovEnricher;
/// use trialmatch::config::{BackendConfig, EnrichmentConfig};
/// use trialmatch::core::lookup::create_lookup;
///
/// # fn example() -> trialmatch::domain::Result<()> {
/// let enricher = ClinicalTrialsGovEnricher::new(&EnrichmentConfig::default())?;
/// let config = BackendConfig::new("https://matcher.example.com/match", "token");
/// let lookup = create_lookup(&config, Some(Arc::new(enricher)))?;
/// # Ok(())
/// # }
/// ```
pub struct ClinicalTrialsGovEnricher {
    base_url: String,
    client: Client,
    max_concurrency: usize,
    nct_pattern: Regex,
}

impl ClinicalTrialsGovEnricher {
    /// Create a new enricher from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &EnrichmentConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                TrialMatchError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        let nct_pattern = Regex::new(r"^NCT\d{8}$").map_err(|e| {
            TrialMatchError::Configuration(format!("Invalid NCT identifier pattern: {e}"))
        })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            max_concurrency: config.max_concurrency.max(1),
            nct_pattern,
        })
    }

    /// Get the registry API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one registry record; `None` if the registry has no such study
    async fn fetch_study(&self, nct_id: &str) -> Result<Option<CtGovStudy>> {
        let url = format!("{}/studies/{}", self.base_url, nct_id);

        tracing::debug!(url = %url, nct_id = %nct_id, "Fetching registry record");

        let response = self
            .client
            .get(&url)
            .query(&[("format", "json")])
            .send()
            .await
            .map_err(|e| {
                TrialMatchError::Enrichment(format!(
                    "Failed to reach ClinicalTrials.gov for {nct_id}: {e}"
                ))
            })?;

        match response.status() {
            StatusCode::OK => response.json::<CtGovStudy>().await.map(Some).map_err(|e| {
                TrialMatchError::Enrichment(format!(
                    "Invalid ClinicalTrials.gov response for {nct_id}: {e}"
                ))
            }),
            StatusCode::NOT_FOUND => {
                tracing::warn!(nct_id = %nct_id, "Study not found in ClinicalTrials.gov");
                Ok(None)
            }
            status => {
                let body = read_error_body(response).await;
                Err(TrialMatchError::Enrichment(format!(
                    "ClinicalTrials.gov returned {status} for {nct_id}: {body}"
                )))
            }
        }
    }
}

#[async_trait]
impl StudyEnricher for ClinicalTrialsGovEnricher {
    async fn update_records(&self, studies: &mut [ResearchStudy]) -> Result<()> {
        let targets: Vec<(usize, String)> = studies
            .iter()
            .enumerate()
            .filter_map(|(index, study)| {
                let nct_id = study.trial_identifier()?.trim();
                if self.nct_pattern.is_match(nct_id) {
                    Some((index, nct_id.to_string()))
                } else {
                    tracing::debug!(
                        study_id = %study.id,
                        identifier = %nct_id,
                        "Skipping enrichment for non-NCT identifier"
                    );
                    None
                }
            })
            .collect();

        if targets.is_empty() {
            return Ok(());
        }

        let fetched: Vec<(usize, Result<Option<CtGovStudy>>)> = stream::iter(targets)
            .map(|(index, nct_id)| async move { (index, self.fetch_study(&nct_id).await) })
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let mut enriched = 0usize;
        for (index, result) in fetched {
            if let Some(record) = result? {
                apply_record(&mut studies[index], record);
                enriched += 1;
            }
        }

        tracing::info!(
            studies = studies.len(),
            enriched = enriched,
            "Enriched studies from ClinicalTrials.gov"
        );

        Ok(())
    }
}

/// Copies registry fields onto `study`; absent registry fields keep existing values
fn apply_record(study: &mut ResearchStudy, record: CtGovStudy) {
    let protocol = record.protocol_section;
    let identification = protocol.identification_module;

    if let Some(title) = identification.brief_title.or(identification.official_title) {
        study.title = Some(title);
    }

    if let Some(summary) = protocol.description_module.brief_summary {
        study.description = Some(summary);
    }

    if let Some(status) = protocol
        .status_module
        .overall_status
        .as_deref()
        .and_then(map_overall_status)
    {
        study.status = status;
    }

    if let Some(phase) = map_phases(&protocol.design_module.phases) {
        study.phase = Some(CodeableConcept::text(phase));
    }

    let conditions = protocol.conditions_module;
    if !conditions.conditions.is_empty() {
        study.condition = conditions
            .conditions
            .into_iter()
            .map(CodeableConcept::text)
            .collect();
    }
    if !conditions.keywords.is_empty() {
        study.keyword = conditions
            .keywords
            .into_iter()
            .map(CodeableConcept::text)
            .collect();
    }
}
