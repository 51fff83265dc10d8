//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for trialmatch using clap.

pub mod commands;

use crate::config::{load_config, LoggingConfig};
use clap::{Parser, Subcommand};

/// Trialmatch - Clinical trial matching adapter
#[derive(Parser, Debug)]
#[command(name = "trialmatch")]
#[command(version, about, long_about = None)]
#[command(author = "Trialmatch Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "trialmatch.toml", env = "TRIALMATCH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TRIALMATCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level and logging settings for this invocation
    ///
    /// `--log-level` wins over `application.log_level`. When the configuration
    /// cannot be loaded, logging falls back to console-only at `info`; the
    /// command itself reports the configuration problem.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        match load_config(&self.config) {
            Ok(config) => (
                self.log_level
                    .clone()
                    .unwrap_or(config.application.log_level),
                config.logging,
            ),
            Err(_) => (
                self.log_level.clone().unwrap_or_else(|| "info".to_string()),
                LoggingConfig::default(),
            ),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find matching clinical trials for one or more patient bundles
    #[command(name = "match")]
    Match(commands::match_trials::MatchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
