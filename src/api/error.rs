use thiserror::Error;

/// Why a city lookup produced no data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection, TLS or request-building failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with a non-2xx status
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not `{ data: [ { id, name, country, .. } ] }`
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
