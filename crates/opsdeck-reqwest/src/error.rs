//! Internal error types for opsdeck-reqwest.

use thiserror::Error;

/// Result type alias for opsdeck-reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for opsdeck-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<Error> for opsdeck_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    opsdeck_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    opsdeck_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else {
                    opsdeck_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => opsdeck_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Config(message) => opsdeck_core::Error::configuration().with_message(message),
        }
    }
}
