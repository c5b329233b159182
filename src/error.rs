//! Error types for the `etrade-chains` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, EtradeError>`.
//!
//! [`EtradeError`] covers:
//! - **API errors**: Structured `{"Error": {...}}` responses from E*TRADE
//! - **HTTP status errors**: Unexpected status codes with response body
//! - **HTTP transport errors**: Network, TLS, timeout failures
//! - **JSON errors**: Deserialization failures
//! - **I/O errors**: Token store and output file access
//! - **Token store errors**: A credential file that cannot be merged into
//! - **Aggregation errors**: An option-chain fetch failed, with the symbol
//! - **Invalid responses**: Well-formed JSON missing a required field
//! - **Invalid arguments**: Client-side validation and configuration errors

use std::fmt;

/// Inner error object returned by the E*TRADE API.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApiErrorBody {
    /// Numeric E*TRADE error code (e.g. `10033`).
    #[serde(default)]
    pub code: Option<i64>,
    /// Human-readable description of the error.
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope the API wraps errors in: `{"Error": {"code": .., "message": ..}}`.
#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    #[serde(rename = "Error")]
    pub error: ApiErrorBody,
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "[{code}] ")?,
            None => write!(f, "[UNKNOWN] ")?,
        }
        write!(f, "{}", self.message.as_deref().unwrap_or("No message"))
    }
}

/// All possible errors produced by the `etrade-chains` client.
#[derive(Debug, thiserror::Error)]
pub enum EtradeError {
    /// An error response returned by the E*TRADE REST API.
    #[error("API error: {0}")]
    Api(ApiErrorBody),

    /// The server returned an unexpected HTTP status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body text.
        body: String,
    },

    /// A network or transport-level error from `reqwest`.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to serialize or deserialize JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error building or parsing a URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The token store holds content that cannot be merged into.
    #[error("token store {path}: {reason}")]
    TokenStore {
        /// Location of the offending store.
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Fetching the option chains for `symbol` failed part-way.
    #[error("{symbol} failed get_all_option_chains: {source}")]
    Aggregation {
        symbol: String,
        #[source]
        source: Box<EtradeError>,
    },

    /// A response parsed as JSON but lacked a field this crate relies on.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// OAuth request signing failed.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl EtradeError {
    pub(crate) fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EtradeError>;
