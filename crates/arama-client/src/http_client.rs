#[cfg(test)]
#[path = "http_client_test.rs"]
mod tests;

use async_trait::async_trait;
use std::time::Duration;

use crate::{ChatClient, ChatError, ChatRequest, ChatResponse, WireMessage};

/// HTTP client for communicating with a remote chat backend
pub struct HttpChatClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn chat(&self, request: ChatRequest) -> Result<WireMessage, ChatError> {
        let chat_url = self.endpoint("chat");
        tracing::debug!(url = %chat_url, session_id = %request.session_id, "sending chat message");

        let response = self
            .client
            .post(&chat_url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::error!(status = status.as_u16(), body = %body, "chat request failed");
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let envelope: ChatResponse = serde_json::from_slice(&body)?;
        let reply = envelope.into_reply()?;

        tracing::debug!(
            message_id = %reply.id,
            used_search = reply.used_search,
            sources = reply.sources.as_ref().map_or(0, |s| s.len()),
            "chat reply received"
        );

        Ok(reply)
    }

    async fn health_check(&self) -> Result<(), ChatError> {
        let health_url = self.endpoint("");
        let response = self
            .client
            .get(&health_url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
                body: "health check failed".to_string(),
            });
        }

        Ok(())
    }
}
