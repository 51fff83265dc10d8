//! Matching service client
//!
//! Sends one query per call and turns the response into a [`SearchSet`] or a
//! typed [`BackendError`]. There is no retry: every call ends after a single
//! request in exactly one of the success or failure states.

use crate::adapters::enrichment::StudyEnricher;
use crate::config::{BackendConfig, SecretString};
use crate::core::convert::convert_response;
use crate::core::diagnostics::{ConversionDiagnostics, TracingDiagnostics};
use crate::core::query::TrialQuery;
use crate::core::response::BackendResponse;
use crate::domain::{BackendError, RawResponse, Result, SearchSet, TrialMatchError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use std::sync::Arc;
use std::time::Duration;

/// Content type sent with every query
pub const QUERY_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// HTTP client for the clinical trial matching service
///
/// # Example
///
/// ```no_run
/// use trialmatch::adapters::enrichment::NoopEnricher;
/// use trialmatch::adapters::matching::MatchingServiceClient;
/// use trialmatch::config::BackendConfig;
/// use trialmatch::core::query::TrialQuery;
/// use trialmatch::domain::PatientBundle;
///
/// # async fn example() -> trialmatch::domain::Result<()> {
/// let config = BackendConfig::new("https://matcher.example.com/match", "token");
/// let client = MatchingServiceClient::new(&config)?;
///
/// let bundle = PatientBundle::from_resources(Vec::new());
/// let results = client.dispatch(&TrialQuery::from_bundle(&bundle), &NoopEnricher).await?;
/// println!("{} matching trials", results.total);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MatchingServiceClient {
    /// URL the query is POSTed to
    endpoint: String,

    /// Bearer token
    auth_token: SecretString,

    /// HTTP client for making requests
    client: Client,

    /// Sink for skipped identifiers
    diagnostics: Arc<dyn ConversionDiagnostics>,
}

impl MatchingServiceClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`TrialMatchError::Configuration`] if the endpoint or token is
    /// missing, the endpoint is not an absolute http(s) URL, or the HTTP
    /// client cannot be built. No network activity happens here.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        config.validate().map_err(TrialMatchError::Configuration)?;

        let (Some(endpoint), Some(auth_token)) = (&config.endpoint, &config.auth_token) else {
            return Err(TrialMatchError::Configuration(
                "Missing endpoint in configuration".to_string(),
            ));
        };

        let mut client_builder = ClientBuilder::new();

        if let Some(seconds) = config.request_timeout_seconds {
            client_builder = client_builder.timeout(Duration::from_secs(seconds));
        }

        if !config.tls_verify {
            tracing::warn!(endpoint = %endpoint, "TLS certificate verification disabled");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            TrialMatchError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            endpoint: endpoint.clone(),
            auth_token: auth_token.clone(),
            client,
            diagnostics: Arc::new(TracingDiagnostics),
        })
    }

    /// Replace the sink that receives skipped-identifier notices
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn ConversionDiagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Get the endpoint queries are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `query` and convert the response
    ///
    /// # Errors
    ///
    /// - [`BackendError::Transport`] if the request does not complete
    /// - [`BackendError::Http`] for any status other than 200
    /// - [`BackendError::Parse`] if a 200 body is not JSON
    /// - [`BackendError::Service`] if the body is an error response
    /// - [`BackendError::UnrecognizedResponse`] for any other JSON body
    /// - whatever `enricher` returns
    pub async fn dispatch(
        &self,
        query: &TrialQuery<'_>,
        enricher: &dyn StudyEnricher,
    ) -> Result<SearchSet> {
        let body = query.to_json()?;

        tracing::debug!(endpoint = %self.endpoint, query = %body, "Sending trial query");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, QUERY_CONTENT_TYPE)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.auth_token.expose_secret().as_ref()),
            )
            .body(body)
            .send()
            .await
            .map_err(BackendError::Transport)?;

        let status = response.status();
        let url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if status != StatusCode::OK {
            let body = read_error_body(response).await;
            tracing::warn!(
                status = status.as_u16(),
                url = %url,
                "Matching service returned an error status"
            );
            return Err(BackendError::Http {
                response: raw_response(url, status, content_type, body),
            }
            .into());
        }

        let body = response.text().await.map_err(BackendError::Transport)?;
        let raw = raw_response(url, status, content_type, body);

        if !raw
            .content_type
            .as_deref()
            .is_some_and(|content_type| content_type.contains("json"))
        {
            tracing::debug!(
                content_type = ?raw.content_type,
                "Response is not labelled as JSON, decoding anyway"
            );
        }

        let value: serde_json::Value = match serde_json::from_str(&raw.body) {
            Ok(value) => value,
            Err(e) => {
                return Err(BackendError::Parse {
                    response: raw,
                    message: e.to_string(),
                }
                .into())
            }
        };

        match BackendResponse::from_value(value) {
            BackendResponse::Success(success) => {
                convert_response(success, enricher, self.diagnostics.as_ref()).await
            }
            BackendResponse::Error(error) => Err(BackendError::Service {
                response: raw,
                error: error.error,
            }
            .into()),
            BackendResponse::Unrecognized(_) => {
                Err(BackendError::UnrecognizedResponse { response: raw }.into())
            }
        }
    }
}

/// Reads the body of an error response
///
/// A failed read yields an empty body; the failure is logged so it can be
/// told apart from a body that really was empty.
pub(crate) async fn read_error_body(response: Response) -> String {
    let url = response.url().to_string();
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "Failed to read error response body");
            String::new()
        }
    }
}

fn raw_response(
    url: String,
    status: StatusCode,
    content_type: Option<String>,
    body: String,
) -> RawResponse {
    RawResponse {
        url,
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        content_type,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_client_creation() {
        let config = BackendConfig::new("https://matcher.example.com/match", "token");
        let client = MatchingServiceClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "https://matcher.example.com/match");
    }

    #[test]
    fn test_client_creation_missing_endpoint() {
        let config = BackendConfig {
            auth_token: Some(secret_string("token".to_string())),
            ..Default::default()
        };

        match MatchingServiceClient::new(&config) {
            Err(TrialMatchError::Configuration(msg)) => {
                assert_eq!(msg, "Missing endpoint in configuration")
            }
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_client_creation_missing_token() {
        let config = BackendConfig {
            endpoint: Some("https://matcher.example.com/match".to_string()),
            ..Default::default()
        };

        match MatchingServiceClient::new(&config) {
            Err(TrialMatchError::Configuration(msg)) => {
                assert_eq!(msg, "Missing auth_token in configuration")
            }
            _ => panic!("Expected Configuration error"),
        }
    }

    #[tokio::test]
    async fn test_read_error_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let response = reqwest::get(server.url()).await.unwrap();
        assert_eq!(read_error_body(response).await, "maintenance");
    }

    #[test]
    fn test_raw_response_without_reason_phrase() {
        let raw = raw_response(
            "http://localhost".to_string(),
            StatusCode::from_u16(599).unwrap(),
            None,
            String::new(),
        );
        assert_eq!(raw.status_text, "");
        assert_eq!(raw.status_line(), "599");
    }

    #[test]
    fn test_raw_response_status_text() {
        let raw = raw_response(
            "http://localhost".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
            "boom".to_string(),
        );
        assert_eq!(raw.status, 500);
        assert_eq!(raw.status_text, "Internal Server Error");
    }
}
