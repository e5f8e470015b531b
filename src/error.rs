//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::error_response::ErrorResponse;

/// Failure of a call to the top-up provider.
///
/// Returned by every `TopupService` method and carried through the routing
/// layer untouched.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The request never produced a usable response (connect, timeout, bad JSON).
    #[error("Provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider rejected the request with status {status}")]
    Rejected {
        status: u16,
        body: serde_json::Value,
    },

    /// The provider base URL could not be parsed or joined.
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation Errors**: Query string missing, malformed or invalid
/// - **Authentication Errors**: Invalid or missing API keys
/// - **Upstream Errors**: The delegated service call failed
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// API key is missing or not one of the accepted keys.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Session not authorized")]
    InvalidApiKey,

    /// Query parameters are missing, malformed or invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The service collaborator failed.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidApiKey` → 401 Unauthorized
/// - `InvalidRequest` → 400 Bad Request
/// - `Upstream` → 400 Bad Request (provider error document under `details`)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("invalid_api_key", self.to_string()),
            ),
            AppError::InvalidRequest(ref msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("invalid_request", msg.clone()),
            ),
            AppError::Upstream(ref err) => {
                tracing::error!(error = %err, "Upstream call failed");

                let body = ErrorResponse::new("upstream_error", err.to_string());
                let body = match err {
                    UpstreamError::Rejected { body: details, .. } if !details.is_null() => {
                        body.with_details(details.clone())
                    }
                    _ => body,
                };
                (StatusCode::BAD_REQUEST, body)
            }
        };

        (status, Json(body)).into_response()
    }
}
