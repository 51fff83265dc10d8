//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "trialmatch.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing trialmatch configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your matching service endpoint", self.output);
                println!("  2. Set TRIALMATCH_BACKEND_AUTH_TOKEN in your environment or .env file");
                println!("  3. Validate configuration: trialmatch validate-config");
                println!("  4. Find trials: trialmatch match patient.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}

/// Sample configuration written by `init`
pub fn sample_config() -> &'static str {
    r#"# Trialmatch Configuration File
# Clinical trial matching adapter

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[backend]
# URL the trial query is POSTed to
endpoint = "https://matcher.example.com/match"

# Bearer token (use an environment variable)
auth_token = "${TRIALMATCH_BACKEND_AUTH_TOKEN}"

# Request timeout in seconds; no timeout when unset
# request_timeout_seconds = 30

tls_verify = true

[enrichment]
# Fill in study details from ClinicalTrials.gov
enabled = false
base_url = "https://clinicaltrials.gov/api/v2"
max_concurrency = 4
timeout_seconds = 30

[logging]
local_enabled = false
local_path = "/var/log/trialmatch"
local_rotation = "daily"  # daily | hourly | never
"#
}
