//! Failure taxonomy at the backend boundary.
//!
//! `NotFound` is the backend telling us a track has no playable source
//! (rights restriction, VIP-only), which the UI must present differently
//! from a transport failure. Nothing here is retried automatically.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("malformed response: {0}")]
    Format(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    /// Short recovery suggestion appended to UI toasts.
    pub fn hint(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "check the connection or switch backend (b)",
            ApiError::Format(_) => "the backend may have changed its format; try the other one (b)",
            ApiError::Backend(_) => "try again later or switch backend (b)",
            ApiError::NotFound(_) => "try the same track on the other backend (b)",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Format(e.to_string())
        } else if e.is_status() {
            ApiError::Backend(e.to_string())
        } else {
            ApiError::Network(e)
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
