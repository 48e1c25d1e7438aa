//! Request/response shapes for the HTTP layer

use serde::{Deserialize, Serialize};

pub mod category;
pub mod inflation;
pub mod item;
pub mod pagination;
pub mod preferences;
pub mod price_alert;
pub mod price_observation;
pub mod shopping_list;
pub mod store;
pub mod user;

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Machine-readable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Trim a required text field, rejecting blanks and overlong values
pub(crate) fn required_text(field: &str, value: &str, max_len: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("{} cannot exceed {} characters", field, max_len));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank input becomes `None`
pub(crate) fn optional_text(
    field: &str,
    value: Option<&str>,
    max_len: usize,
) -> Result<Option<String>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => required_text(field, v, max_len).map(Some),
    }
}
