//! Error types for the completion service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompletionError>;

/// Everything that can go wrong during a single completion call.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}
