//! Diagnostics port for the response converter
//!
//! Skipped identifiers are reported through an injected sink instead of
//! being written straight to the global subscriber, so tests can observe
//! them without capturing log output.

use serde_json::Value;

/// Receives notices about recoverable conversion problems
pub trait ConversionDiagnostics: Send + Sync {
    /// Called for every identifier that is not a string
    ///
    /// `index` is the position in the backend's `trialIdentifiers` array.
    fn skipped_identifier(&self, index: usize, value: &Value);
}

/// Default sink that forwards notices to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl ConversionDiagnostics for TracingDiagnostics {
    fn skipped_identifier(&self, index: usize, value: &Value) {
        tracing::warn!(
            index = index,
            value = %value,
            "Skipping trial identifier that is not a string"
        );
    }
}
