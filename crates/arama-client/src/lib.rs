//! Transport for the arama chat backend.
//!
//! The backend exposes a single conversational endpoint, `POST /api/chat`, which
//! answers one user message with one assistant message and optionally cites the
//! web pages it consulted. This crate owns the wire format and the HTTP plumbing;
//! it holds no conversation state of its own.

use async_trait::async_trait;

pub mod error;
pub mod http_client;
pub mod types;

pub use error::ChatError;
pub use http_client::HttpChatClient;
pub use types::*;

/// ChatClient trait for talking to a chat backend
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one user message and wait for the assistant's reply
    async fn chat(&self, request: ChatRequest) -> Result<WireMessage, ChatError>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> Result<(), ChatError>;
}
