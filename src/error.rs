//! Crate-wide error type.
//!
//! The scheduler and quality estimator never fail. Errors only come from
//! validating caller-supplied state and from the JSON card files.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid schedule state: {0}")]
    InvalidState(String),

    #[error("flashcard {0} not found")]
    CardNotFound(i64),

    #[error("invalid timestamp '{0}': expected RFC 3339")]
    InvalidTimestamp(String),
}

pub type Result<T> = std::result::Result<T, Error>;
