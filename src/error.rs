use std::sync::Arc;

use thiserror::Error;

/// Transport-layer failures raised while building a request or decoding a body.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    #[error("{0}")]
    Reqwest(Arc<reqwest::Error>),

    #[error("response decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        HttpError::Reqwest(Arc::new(error))
    }
}

/// PlugNotas SDK error types
#[derive(Debug, Error)]
pub enum PlugNotasError {
    #[error("HTTP request error: {0}")]
    Http(#[from] HttpError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("PlugNotas API error (status={status}): {body}")]
    Api { status: u16, body: String },
}

impl From<reqwest::Error> for PlugNotasError {
    fn from(error: reqwest::Error) -> Self {
        PlugNotasError::Http(HttpError::from(error))
    }
}

impl PlugNotasError {
    /// Returns `true` for errors raised before any request left the process.
    pub fn is_validation(&self) -> bool {
        matches!(self, PlugNotasError::Validation(_))
    }

    /// HTTP status carried by an [`PlugNotasError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            PlugNotasError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
