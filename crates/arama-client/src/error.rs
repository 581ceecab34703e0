//! Failure modes of a chat exchange.
//!
//! Every variant is recoverable from the caller's point of view: the session stays
//! usable and the caller decides how to surface the failure.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("chat request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend rejected the message: {0}")]
    Rejected(String),
    #[error("malformed reply: {0}")]
    Malformed(String),
    #[error("could not decode reply: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ChatError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ChatError::Transport(err) if err.is_timeout())
    }
}
