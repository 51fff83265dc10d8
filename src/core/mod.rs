//! Core business logic for trialmatch.
//!
//! # Modules
//!
//! - [`query`] - Patient bundle to query conversion
//! - [`response`] - Classification of matching service responses
//! - [`mapper`] - Trial identifier to study mapping
//! - [`convert`] - Success response to search set conversion
//! - [`diagnostics`] - Sink for recoverable conversion problems
//! - [`lookup`] - The public lookup surface
//!
//! # Lookup Workflow
//!
//! 1. **Validate**: `create_lookup` checks endpoint and token
//! 2. **Build**: read filters from the bundle's `Parameters` resources
//! 3. **Dispatch**: POST the query to the matching service
//! 4. **Classify**: success, error, or unrecognized response
//! 5. **Convert**: map identifiers to studies, then run the enricher
//!
//! ```rust,no_run
//! use trialmatch::config::load_config;
//! use trialmatch::core::lookup::create_lookup;
//! use trialmatch::domain::PatientBundle;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("trialmatch.toml")?;
//! let lookup = create_lookup(&config.backend, None)?;
//!
//! let bundle: PatientBundle = serde_json::from_str(&std::fs::read_to_string("patient.json")?)?;
//! let results = lookup.lookup(&bundle).await?;
//! println!("Found {} trials", results.total);
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod diagnostics;
pub mod lookup;
pub mod mapper;
pub mod query;
pub mod response;

pub use diagnostics::{ConversionDiagnostics, TracingDiagnostics};
pub use lookup::{create_lookup, TrialLookup};
pub use query::{build_query, TrialQuery};
pub use response::{is_error_response, is_success_response, BackendResponse};
