//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::TrialMatchConfig;
use super::secret::secret_string;
use crate::domain::errors::TrialMatchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TrialMatchConfig
/// 4. Applies environment variable overrides (TRIALMATCH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use trialmatch::config::loader::load_config;
///
/// let config = load_config("trialmatch.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TrialMatchConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TrialMatchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TrialMatchError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: TrialMatchConfig = toml::from_str(&contents)
        .map_err(|e| TrialMatchError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        TrialMatchError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    tracing::debug!(path = %path.display(), "Configuration loaded");

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TrialMatchError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(TrialMatchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the TRIALMATCH_* prefix
///
/// Variables follow the pattern TRIALMATCH_<SECTION>_<KEY>, for example
/// TRIALMATCH_BACKEND_ENDPOINT. Unparsable numeric or boolean values are ignored.
fn apply_env_overrides(config: &mut TrialMatchConfig) {
    if let Ok(val) = std::env::var("TRIALMATCH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("TRIALMATCH_BACKEND_ENDPOINT") {
        config.backend.endpoint = Some(val);
    }
    if let Ok(val) = std::env::var("TRIALMATCH_BACKEND_AUTH_TOKEN") {
        config.backend.auth_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("TRIALMATCH_BACKEND_REQUEST_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            config.backend.request_timeout_seconds = Some(seconds);
        }
    }

    if let Ok(val) = std::env::var("TRIALMATCH_ENRICHMENT_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.enrichment.enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("TRIALMATCH_ENRICHMENT_BASE_URL") {
        config.enrichment.base_url = val;
    }

    if let Ok(val) = std::env::var("TRIALMATCH_LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("TRIALMATCH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
