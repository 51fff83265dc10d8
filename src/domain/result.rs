//! Result type alias for trialmatch

use super::errors::TrialMatchError;

/// Result type alias for trialmatch operations
///
/// # Examples
///
/// ```
/// use trialmatch::domain::result::Result;
/// use trialmatch::domain::errors::TrialMatchError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(TrialMatchError::Configuration("Missing endpoint in configuration".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TrialMatchError>;
