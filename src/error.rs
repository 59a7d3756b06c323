use crate::config::prompt::ERROR_PREFIX;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to open history database: {0}")]
    Open(#[source] sqlx::Error),
    #[error("history query failed: {0}")]
    Query(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("invalid API key format: {0}")]
    InvalidCredential(String),
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("completion endpoint returned {status}: {body}")]
    Status {
        status: StatusCode,
        body: String,
    },
    #[error("unexpected completion response: {0}")]
    MalformedResponse(String),
}

/// Failure of a single bot handler.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("telegram request failed: {0}")]
    Transport(#[from] teloxide::RequestError),
    #[error("file download failed: {0}")]
    Download(#[from] teloxide::DownloadError),
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    /// Text shown to the user when the chat flow fails.
    pub fn user_notice(&self) -> String {
        format!("{}{}", ERROR_PREFIX, self)
    }
}
