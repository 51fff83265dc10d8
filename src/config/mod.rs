//! Configuration management for trialmatch.
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `TRIALMATCH_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trialmatch::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("trialmatch.toml")?;
//!
//! if let Some(endpoint) = &config.backend.endpoint {
//!     println!("Matching service: {endpoint}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [backend]
//! endpoint = "https://matcher.example.com/match"
//! auth_token = "${TRIALMATCH_BACKEND_AUTH_TOKEN}"
//!
//! [enrichment]
//! enabled = true
//! base_url = "https://clinicaltrials.gov/api/v2"
//!
//! [logging]
//! local_enabled = false
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, BackendConfig, EnrichmentConfig, LoggingConfig, TrialMatchConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
