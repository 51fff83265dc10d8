//! CLI command implementations

pub mod init;
pub mod match_trials;
pub mod validate;
