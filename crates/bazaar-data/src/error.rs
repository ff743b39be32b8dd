//! Transport error types.

use bazaar_market::MarketError;
use thiserror::Error;

/// Errors that can occur when talking to the marketplace API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The server answered with a GraphQL-level error.
    #[error("{0}")]
    GraphQl(String),

    /// Failed to parse the response envelope.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

impl From<FetchError> for MarketError {
    fn from(e: FetchError) -> Self {
        MarketError::Remote(e.to_string())
    }
}
