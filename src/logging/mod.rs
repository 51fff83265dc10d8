//! Logging and observability
//!
//! Structured logging via `tracing`, with console output and optional JSON
//! files with rotation.
//!
//! # Example
//!
//! ```no_run
//! use trialmatch::logging::init_logging;
//! use trialmatch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

// Lets the exported macros resolve `tracing` in crates that don't depend on it
#[doc(hidden)]
pub use tracing;

/// Log the start of a trial lookup
///
/// # Example
///
/// ```no_run
/// use trialmatch::log_lookup_start;
///
/// log_lookup_start!("https://matcher.example.com/match", 3);
/// ```
#[macro_export]
macro_rules! log_lookup_start {
    ($endpoint:expr, $bundle_entries:expr) => {
        $crate::logging::tracing::info!(
            endpoint = %$endpoint,
            bundle_entries = $bundle_entries,
            "Starting trial lookup"
        );
    };
}

/// Log the completion of a trial lookup
///
/// # Example
///
/// ```no_run
/// use trialmatch::log_lookup_complete;
/// use std::time::Duration;
///
/// log_lookup_complete!(12, Duration::from_millis(250));
/// ```
#[macro_export]
macro_rules! log_lookup_complete {
    ($count:expr, $duration:expr) => {
        $crate::logging::tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Trial lookup completed"
        );
    };
}
