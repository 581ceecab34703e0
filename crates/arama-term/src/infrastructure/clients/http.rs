#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use arama_client::ChatClient;
use arama_client::ChatRequest;
use arama_client::HttpChatClient;
use arama_client::WireMessage;
use arama_client::WireSource;
use async_trait::async_trait;
use chrono::Utc;

use crate::domain::models::ChatBackend;
use crate::domain::models::Message;
use crate::domain::models::Source;

/// Chat backend reached over `POST {base}/api/chat`.
pub struct HttpBackend {
    client: Box<dyn ChatClient>,
}

impl HttpBackend {
    pub fn new(url: &str, timeout: Duration) -> HttpBackend {
        return HttpBackend::with_client(Box::new(HttpChatClient::new(url).with_timeout(timeout)));
    }

    pub fn with_client(client: Box<dyn ChatClient>) -> HttpBackend {
        return HttpBackend { client };
    }
}

fn source_from_wire(source: WireSource) -> Option<Source> {
    if let Err(err) = reqwest::Url::parse(&source.url) {
        tracing::debug!(url = %source.url, error = %err, "dropping source without an absolute url");
        return None;
    }

    return Some(Source {
        title: source.title,
        snippet: source.snippet,
        url: source.url,
    });
}

/// Converts a validated assistant reply. An unreadable timestamp becomes the
/// receive time.
pub fn message_from_wire(wire: WireMessage) -> Message {
    let timestamp = wire.parsed_timestamp().unwrap_or_else(|| {
        tracing::debug!(timestamp = ?wire.timestamp, "reply timestamp unreadable, using receive time");
        return Utc::now();
    });

    let sources = wire
        .sources
        .unwrap_or_default()
        .into_iter()
        .filter_map(source_from_wire)
        .collect::<Vec<Source>>();

    return Message::assistant(
        &wire.id,
        &wire.content,
        timestamp,
        wire.used_search,
        sources,
    );
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn health_check(&self) -> Result<()> {
        self.client.health_check().await?;

        return Ok(());
    }

    async fn send_message(&self, session_id: &str, text: &str) -> Result<Message> {
        let wire = match self.client.chat(ChatRequest::new(session_id, text)).await {
            Ok(wire) => wire,
            Err(err) => {
                if err.is_timeout() {
                    tracing::warn!(session_id = %session_id, "backend did not answer before the request timeout");
                }
                return Err(err.into());
            }
        };
        tracing::info!(
            id = %wire.id,
            used_search = wire.used_search,
            sources = wire.sources.as_ref().map(|s| s.len()).unwrap_or(0),
            "received reply"
        );

        return Ok(message_from_wire(wire));
    }
}
