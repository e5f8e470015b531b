//! JSON body returned for every error response.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error response envelope.
///
/// # JSON Example
///
/// ```json
/// {
///   "error": {
///     "code": "invalid_request",
///     "message": "accountNumber must not be empty"
///   }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Machine-readable code plus a human-readable message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable error code (`invalid_request`, `invalid_api_key`, `upstream_error`)
    pub code: String,

    pub message: String,

    /// Error document returned by the provider, when there was one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.error.details = Some(details);
        self
    }
}
