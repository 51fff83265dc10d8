//! Domain error types
//!
//! This module defines the error hierarchy for trialmatch. Backend failures
//! carry a snapshot of the HTTP response so callers can inspect what the
//! matching service actually sent.

use thiserror::Error;

/// Main trialmatch error type
///
/// This is the primary error type used throughout the crate.
#[derive(Debug, Error)]
pub enum TrialMatchError {
    /// Configuration errors, raised before any network activity
    #[error("{0}")]
    Configuration(String),

    /// Matching service errors
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Errors raised by an enrichment collaborator
    #[error("Enrichment error: {0}")]
    Enrichment(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Snapshot of an HTTP response returned by the matching service
///
/// The body has already been consumed by the time an error is raised, so
/// the text is kept here alongside the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// URL the request was sent to
    pub url: String,

    /// HTTP status code
    pub status: u16,

    /// Canonical reason phrase for the status (may be empty)
    pub status_text: String,

    /// Value of the `Content-Type` header, if present
    pub content_type: Option<String>,

    /// Response body read as text
    pub body: String,
}

impl RawResponse {
    /// Status code followed by the reason phrase, when there is one
    pub fn status_line(&self) -> String {
        if self.status_text.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.status_text)
        }
    }
}

/// Matching service errors
///
/// One variant per terminal failure state of a dispatch.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never completed
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// HTTP 200 but the body was not valid JSON
    #[error("Unable to parse response as JSON")]
    Parse {
        response: RawResponse,
        message: String,
    },

    /// The service reported an error in an otherwise well-formed response
    #[error("Error from service: {error}")]
    Service { response: RawResponse, error: String },

    /// Any status other than 200
    #[error("Server returned {}", .response.status_line())]
    Http { response: RawResponse },

    /// HTTP 200 with JSON matching neither the success nor the error shape
    #[error("Unable to parse response from server")]
    UnrecognizedResponse { response: RawResponse },
}

impl BackendError {
    /// Returns the response snapshot, if the request got as far as a response
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            BackendError::Transport(_) => None,
            BackendError::Parse { response, .. }
            | BackendError::Service { response, .. }
            | BackendError::Http { response }
            | BackendError::UnrecognizedResponse { response } => Some(response),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for TrialMatchError {
    fn from(err: std::io::Error) -> Self {
        TrialMatchError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TrialMatchError {
    fn from(err: serde_json::Error) -> Self {
        TrialMatchError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TrialMatchError {
    fn from(err: toml::de::Error) -> Self {
        TrialMatchError::Configuration(format!("TOML parse error: {err}"))
    }
}
