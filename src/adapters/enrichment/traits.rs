//! Enrichment collaborator trait
//!
//! An enricher receives the full list of mapped studies once per lookup and
//! may fill in or overwrite fields in place. How it schedules its own work
//! is up to the implementation.

use crate::domain::{ResearchStudy, Result};
use async_trait::async_trait;

/// Augments mapped studies with data from another source
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use trialmatch::adapters::enrichment::StudyEnricher;
/// use trialmatch::domain::{ResearchStudy, Result};
///
/// struct Titler;
///
/// #[async_trait]
/// impl StudyEnricher for Titler {
///     async fn update_records(&self, studies: &mut [ResearchStudy]) -> Result<()> {
///         for study in studies.iter_mut() {
///             study.title = Some(format!("Study {}", study.id));
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait StudyEnricher: Send + Sync {
    /// Updates `studies` in place
    ///
    /// # Errors
    ///
    /// Any error is returned to the caller of the lookup unchanged.
    async fn update_records(&self, studies: &mut [ResearchStudy]) -> Result<()>;
}

/// Enricher that leaves studies untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEnricher;

#[async_trait]
impl StudyEnricher for NoopEnricher {
    async fn update_records(&self, _studies: &mut [ResearchStudy]) -> Result<()> {
        Ok(())
    }
}
