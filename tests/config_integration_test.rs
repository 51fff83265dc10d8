//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` to avoid
//! interfering with each other.

use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use trialmatch::config::load_config;
use trialmatch::core::lookup::create_lookup;
use trialmatch::domain::TrialMatchError;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("TRIALMATCH_APPLICATION_LOG_LEVEL");
    std::env::remove_var("TRIALMATCH_BACKEND_ENDPOINT");
    std::env::remove_var("TRIALMATCH_BACKEND_AUTH_TOKEN");
    std::env::remove_var("TRIALMATCH_BACKEND_REQUEST_TIMEOUT_SECONDS");
    std::env::remove_var("TRIALMATCH_ENRICHMENT_ENABLED");
    std::env::remove_var("TRIALMATCH_ENRICHMENT_BASE_URL");
    std::env::remove_var("TRIALMATCH_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("TRIALMATCH_LOGGING_LOCAL_PATH");
    std::env::remove_var("TEST_MATCHER_TOKEN");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[backend]
endpoint = "https://matcher.example.com/match"
auth_token = "static-token"
request_timeout_seconds = 45
tls_verify = false

[enrichment]
enabled = true
base_url = "https://registry.example.com/api/v2"
max_concurrency = 8
timeout_seconds = 10

[logging]
local_enabled = true
local_path = "/tmp/trialmatch"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(
        config.backend.endpoint.as_deref(),
        Some("https://matcher.example.com/match")
    );
    assert_eq!(
        config
            .backend
            .auth_token
            .as_ref()
            .map(|t| t.expose_secret().as_ref().to_string()),
        Some("static-token".to_string())
    );
    assert_eq!(config.backend.request_timeout_seconds, Some(45));
    assert!(!config.backend.tls_verify);
    assert!(config.enrichment.enabled);
    assert_eq!(config.enrichment.max_concurrency, 8);
    assert_eq!(config.enrichment.timeout_seconds, 10);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[backend]
endpoint = "https://matcher.example.com/match"
auth_token = "token"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.backend.request_timeout_seconds, None);
    assert!(config.backend.tls_verify);
    assert!(!config.enrichment.enabled);
    assert_eq!(config.enrichment.base_url, "https://clinicaltrials.gov/api/v2");
    assert_eq!(config.enrichment.max_concurrency, 4);
    assert_eq!(config.enrichment.timeout_seconds, 30);
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_MATCHER_TOKEN", "substituted-token");

    let file = write_config(
        r#"
[backend]
endpoint = "https://matcher.example.com/match"
# auth_token = "${TEST_MATCHER_UNUSED}"
auth_token = "${TEST_MATCHER_TOKEN}"
"#,
    );

    let config = load_config(file.path()).unwrap();
    let token = config.backend.auth_token.unwrap();
    assert_eq!(token.expose_secret().as_ref(), "substituted-token");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_configuration_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[backend]
endpoint = "https://matcher.example.com/match"
auth_token = "${TEST_MATCHER_TOKEN}"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, TrialMatchError::Configuration(_)));
    assert!(err.to_string().contains("TEST_MATCHER_TOKEN"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TRIALMATCH_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("TRIALMATCH_BACKEND_ENDPOINT", "https://override.example.com/match");
    std::env::set_var("TRIALMATCH_BACKEND_AUTH_TOKEN", "override-token");
    std::env::set_var("TRIALMATCH_BACKEND_REQUEST_TIMEOUT_SECONDS", "12");
    std::env::set_var("TRIALMATCH_ENRICHMENT_ENABLED", "true");

    let file = write_config(
        r#"
[backend]
endpoint = "https://matcher.example.com/match"
auth_token = "token"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(
        config.backend.endpoint.as_deref(),
        Some("https://override.example.com/match")
    );
    assert_eq!(
        config.backend.auth_token.unwrap().expose_secret().as_ref(),
        "override-token"
    );
    assert_eq!(config.backend.request_timeout_seconds, Some(12));
    assert!(config.enrichment.enabled);

    cleanup_env_vars();
}

#[test]
fn test_missing_endpoint_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[backend]
auth_token = "token"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, TrialMatchError::Configuration(_)));
    assert!(err
        .to_string()
        .ends_with("Missing endpoint in configuration"));
}

#[test]
fn test_missing_token_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[backend]
endpoint = "https://matcher.example.com/match"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err
        .to_string()
        .ends_with("Missing auth_token in configuration"));
}

#[test]
fn test_invalid_rotation_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[backend]
endpoint = "https://matcher.example.com/match"
auth_token = "token"

[logging]
local_rotation = "size"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("local_rotation"));
}

#[test]
fn test_loaded_config_creates_lookup() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[backend]
endpoint = "https://matcher.example.com/match"
auth_token = "token"
request_timeout_seconds = 5
"#,
    );

    let config = load_config(file.path()).unwrap();
    let lookup = create_lookup(&config.backend, None).unwrap();
    assert_eq!(lookup.endpoint(), "https://matcher.example.com/match");
}
