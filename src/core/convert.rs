//! Success response to search set conversion

use super::diagnostics::ConversionDiagnostics;
use super::mapper::map_identifier_to_study;
use super::response::SuccessResponse;
use crate::adapters::enrichment::StudyEnricher;
use crate::domain::{Result, SearchSet};

/// Maps every string identifier of `response` to a study and runs the enricher
///
/// Studies are numbered from 0 in the order their identifiers appear; entries
/// that are not strings are reported to `diagnostics` and skipped without
/// consuming a number. The enricher sees the complete list exactly once.
///
/// # Errors
///
/// Only errors returned by the enricher are propagated.
pub async fn convert_response(
    response: SuccessResponse,
    enricher: &dyn StudyEnricher,
    diagnostics: &dyn ConversionDiagnostics,
) -> Result<SearchSet> {
    let mut studies = Vec::with_capacity(response.trial_identifiers.len());

    for (index, value) in response.trial_identifiers.iter().enumerate() {
        match value.as_str() {
            Some(identifier) => {
                let sequential_id = studies.len();
                studies.push(map_identifier_to_study(identifier, sequential_id));
            }
            None => diagnostics.skipped_identifier(index, value),
        }
    }

    tracing::debug!(
        received = response.trial_identifiers.len(),
        mapped = studies.len(),
        "Mapped trial identifiers"
    );

    enricher.update_records(&mut studies).await?;

    Ok(SearchSet::new(studies))
}
