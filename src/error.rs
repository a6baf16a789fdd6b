//! Error types for the Littlepay API client.
//!
//! A single [`Error`] enum covers transport failures, rejected token
//! requests, non-success API responses and problems with the local
//! configuration store.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Littlepay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Littlepay operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The config file could not be parsed or written as YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A protected endpoint returned a non-success status
    #[error("API error: status={status}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// The token endpoint rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The active participant has no usable credentials for the active environment
    #[error("Missing credentials for participant '{participant}' in environment '{env}'")]
    MissingCredentials {
        /// Active environment name
        env: String,
        /// Active participant id
        participant: String,
    },

    /// The config store holds an unknown or malformed selection
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// The HTTP status behind this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication(_))
    }

    /// Returns `true` if the local configuration is at fault.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::MissingCredentials { .. } | Error::Config(_))
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => (400..500).contains(status),
            Error::InvalidInput(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an API error from a response status and body.
    ///
    /// Littlepay error bodies are not uniform; the first of `message`,
    /// `error_description`, `error` or `detail` that is a string wins.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let message = ["message", "error_description", "error", "detail"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .or_else(|| body.as_str().filter(|s| !s.is_empty()))
            .map(String::from)
            .unwrap_or_else(|| {
                reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown API error")
                    .to_string()
            });

        Error::Api {
            status,
            message,
            body,
        }
    }
}
