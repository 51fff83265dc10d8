//! Study enrichment
//!
//! Enrichers fill in study details after identifiers have been mapped.
//! [`NoopEnricher`] leaves studies unchanged; [`ClinicalTrialsGovEnricher`]
//! fetches registry records from ClinicalTrials.gov.

pub mod clinicaltrials;
pub mod models;
pub mod traits;

pub use clinicaltrials::ClinicalTrialsGovEnricher;
pub use traits::{NoopEnricher, StudyEnricher};
