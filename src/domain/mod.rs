//! Domain models and types for trialmatch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Input** ([`PatientBundle`]) - the patient data a lookup starts from
//! - **Output** ([`ResearchStudy`], [`SearchSet`]) - normalized matched trials
//! - **Error types** ([`TrialMatchError`], [`BackendError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, TrialMatchError>`]. Failures
//! reported by the matching service surface as [`BackendError`] variants that
//! keep a [`RawResponse`] snapshot:
//!
//! ```rust
//! use trialmatch::domain::{BackendError, TrialMatchError};
//!
//! fn describe(err: &TrialMatchError) -> String {
//!     match err {
//!         TrialMatchError::Backend(BackendError::Http { response }) => {
//!             format!("HTTP {} from {}", response.status, response.url)
//!         }
//!         other => other.to_string(),
//!     }
//! }
//! ```

pub mod bundle;
pub mod errors;
pub mod result;
pub mod search_set;
pub mod study;

// Re-export commonly used types for convenience
pub use bundle::{BundleEntry, PatientBundle};
pub use errors::{BackendError, RawResponse, TrialMatchError};
pub use result::Result;
pub use search_set::{SearchEntryMode, SearchInfo, SearchSet, SearchSetEntry};
pub use study::{
    CodeableConcept, Identifier, IdentifierUse, ResearchStudy, StudyStatus,
    CLINICAL_TRIAL_IDENTIFIER_CODING_SYSTEM_URL,
};
