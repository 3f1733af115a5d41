//! Widget error types.

use thiserror::Error;

/// Failures loading a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Transport failure or non-success status from the endpoint.
    #[error("network error: {0}")]
    Network(String),

    /// The payload could not be decoded as a listing response.
    #[error("invalid response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

/// Failures reading the widget configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The page has no embedded configuration element.
    #[error("configuration element not found")]
    Missing,

    /// The configuration JSON is malformed.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}
