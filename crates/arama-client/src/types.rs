use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ChatError;

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

impl ChatRequest {
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
        }
    }
}

/// Envelope returned by `POST /api/chat`.
///
/// `message` is kept as raw JSON until the envelope has declared success, so a
/// failure envelope never trips over the shape of the message it carries.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatResponse {
    /// Resolve the envelope into the assistant message it declares.
    pub fn into_reply(self) -> Result<WireMessage, ChatError> {
        if !self.success {
            let reason = self
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(ChatError::Rejected(reason));
        }

        let Some(raw) = self.message else {
            return Err(ChatError::Malformed(
                "success reply without a message".to_string(),
            ));
        };

        let message: WireMessage = serde_json::from_value(raw)
            .map_err(|err| ChatError::Malformed(err.to_string()))?;

        if message.role != "assistant" {
            return Err(ChatError::Malformed(format!(
                "expected an assistant message, got role '{}'",
                message.role
            )));
        }

        Ok(message)
    }
}

/// A chat message as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub id: String,
    pub role: String,
    pub content: String,
    pub timestamp: String,
    pub used_search: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<WireSource>>,
}

impl WireMessage {
    /// The message timestamp, when it parses.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// A web page cited by the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSource {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// Parse an ISO-8601 timestamp. Offsets are honored; a naive date-time is read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    raw.parse::<NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc())
}
