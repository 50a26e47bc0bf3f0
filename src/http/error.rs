use reqwest::Method;
use thiserror::Error;

/// Failures of the request helper. A response with an error status is not a
/// `SendError`; callers inspect the status themselves.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Failed to build {method} request for {url}")]
    Build {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to send {method} request to {url}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {url}")]
    ReadBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
