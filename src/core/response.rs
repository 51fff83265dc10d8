//! Matching service response classification
//!
//! A decoded response body is sorted into one of three variants. Only the
//! outer shape is checked here: the elements of `trialIdentifiers` stay as raw
//! JSON and are validated one by one during conversion, so a single malformed
//! element cannot invalidate a whole response.

use serde::Deserialize;
use serde_json::Value;

/// Field holding the matched trial identifiers in a success response
pub const TRIAL_IDENTIFIERS_FIELD: &str = "trialIdentifiers";

/// Field holding the message in an error response
pub const ERROR_FIELD: &str = "error";

/// `{ "trialIdentifiers": [ ... ] }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuccessResponse {
    #[serde(rename = "trialIdentifiers")]
    pub trial_identifiers: Vec<Value>,
}

/// `{ "error": "<message>" }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Decoded response body
///
/// Variants are tried in declaration order, so a body that carries both a
/// `trialIdentifiers` array and an `error` string is a success.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BackendResponse {
    Success(SuccessResponse),
    Error(ErrorResponse),
    Unrecognized(Value),
}

impl BackendResponse {
    /// Classifies a decoded JSON value
    ///
    /// # Examples
    ///
    /// ```
    /// use trialmatch::core::response::BackendResponse;
    /// use serde_json::json;
    ///
    /// let response = BackendResponse::from_value(json!({ "trialIdentifiers": ["NCT12345678", 7] }));
    /// assert!(matches!(response, BackendResponse::Success(s) if s.trial_identifiers.len() == 2));
    ///
    /// let response = BackendResponse::from_value(json!({ "error": "bad zip" }));
    /// assert!(matches!(response, BackendResponse::Error(e) if e.error == "bad zip"));
    ///
    /// let response = BackendResponse::from_value(json!(["NCT12345678"]));
    /// assert!(matches!(response, BackendResponse::Unrecognized(_)));
    /// ```
    pub fn from_value(value: Value) -> Self {
        // Derived struct impls also accept JSON arrays; only objects qualify.
        if !value.is_object() {
            return Self::Unrecognized(value);
        }

        Self::deserialize(&value).unwrap_or_else(|_| Self::Unrecognized(value))
    }
}

/// True iff `value` is an object whose `trialIdentifiers` field is an array
pub fn is_success_response(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|fields| fields.get(TRIAL_IDENTIFIERS_FIELD))
        .is_some_and(Value::is_array)
}

/// True iff `value` is an object whose `error` field is a string
pub fn is_error_response(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|fields| fields.get(ERROR_FIELD))
        .is_some_and(Value::is_string)
}
