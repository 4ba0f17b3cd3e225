//! Error types for the client.

use crate::config::ConfigError;
use jobtrail_storage::FileStoreError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Override store error: {0}")]
    Storage(#[from] FileStoreError),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
