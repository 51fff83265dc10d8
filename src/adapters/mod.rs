//! External system integrations for trialmatch.
//!
//! - [`matching`] - the clinical trial matching service
//! - [`enrichment`] - study enrichment (trait-based), with a ClinicalTrials.gov implementation
//!
//! Adapters isolate HTTP dependencies so the core can be tested with mock
//! implementations.

pub mod enrichment;
pub mod matching;
