#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use uuid::Uuid;

/// Shown in place of a reply whenever an exchange with the backend fails.
pub const FALLBACK_TEXT: &str = "Sorry, something went wrong. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub used_search: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
}

/// Clock-derived id with a random suffix, so two ids minted in the same
/// millisecond still differ.
pub fn local_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    return format!(
        "{prefix}_{}_{}",
        Utc::now().timestamp_millis(),
        &suffix[..9]
    );
}

impl Message {
    /// A message authored by the user. `content` is expected to be trimmed already.
    pub fn user(content: &str) -> Message {
        return Message {
            id: local_id("msg"),
            role: Role::User,
            content: content.to_string(),
            timestamp: Utc::now(),
            used_search: false,
            sources: None,
        };
    }

    /// A reply produced by the assistant. An empty source list is stored as `None`.
    pub fn assistant(
        id: &str,
        content: &str,
        timestamp: DateTime<Utc>,
        used_search: bool,
        sources: Vec<Source>,
    ) -> Message {
        return Message {
            id: id.to_string(),
            role: Role::Assistant,
            content: content.to_string(),
            timestamp,
            used_search,
            sources: if sources.is_empty() {
                None
            } else {
                Some(sources)
            },
        };
    }

    /// The locally synthesized reply used when an exchange fails.
    pub fn fallback() -> Message {
        return Message {
            id: local_id("error"),
            role: Role::Assistant,
            content: FALLBACK_TEXT.to_string(),
            timestamp: Utc::now(),
            used_search: false,
            sources: None,
        };
    }

    pub fn is_user(&self) -> bool {
        return self.role == Role::User;
    }

    pub fn sources(&self) -> &[Source] {
        return self.sources.as_deref().unwrap_or_default();
    }

    /// Hour and minute in the local timezone.
    pub fn format_time(&self) -> String {
        return self
            .timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string();
    }
}
