#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use super::Message;

/// Read-only view of the history at the time it was taken.
pub type Snapshot = Arc<Vec<Message>>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HistoryError {
    #[error("a message with id '{0}' is already in the history")]
    DuplicateId(String),
}

/// Ordered conversation history.
///
/// Messages can only be appended or cleared all at once. The backing vector is
/// shared with outstanding snapshots and copied on the next write, so a snapshot
/// never observes later mutations.
#[derive(Debug, Default, Clone)]
pub struct History {
    messages: Arc<Vec<Message>>,
    ids: HashSet<String>,
}

impl History {
    pub fn new() -> History {
        return History::default();
    }

    pub fn append(&mut self, message: Message) -> Result<(), HistoryError> {
        if self.ids.contains(&message.id) {
            return Err(HistoryError::DuplicateId(message.id));
        }

        self.ids.insert(message.id.clone());
        Arc::make_mut(&mut self.messages).push(message);

        return Ok(());
    }

    pub fn clear(&mut self) {
        self.messages = Arc::new(vec![]);
        self.ids.clear();
    }

    pub fn snapshot(&self) -> Snapshot {
        return Arc::clone(&self.messages);
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }
}
