//! Error types for the GraphQL tester
//!
//! Check failures fall into three kinds: transport (the request never
//! produced a usable response), protocol (unexpected status or GraphQL
//! `errors`), and content assertions. Configuration errors are the only
//! ones that abort the process before any check runs.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tester
#[derive(Error, Debug)]
pub enum Error {
    // === Transport Errors ===
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    // === Protocol Errors ===
    #[error("Expected status {expected}, got {actual}\n{body}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Test Errors ===
    #[error("Assertion failed: {0}")]
    TestAssertion(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

impl Error {
    /// Create a transport error for a request to `url`
    pub fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// Create a malformed response error for a request to `url`
    pub fn malformed(url: &str, err: impl std::fmt::Display) -> Self {
        Self::MalformedResponse {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// Whether the server answered with a GraphQL `errors` array
    pub fn is_graphql(&self) -> bool {
        matches!(self, Self::GraphQl(_))
    }

    /// Whether the request failed before a response could be interpreted
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::MalformedResponse { .. }
        )
    }
}
