use anyhow::Result;

use super::Message;

/// Identifies one dispatch. `epoch` is the number of history clears that had
/// happened when the dispatch was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub epoch: u64,
}

/// The single outbound request produced by an accepted submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub ticket: Ticket,
    pub session_id: String,
    pub message: String,
}

/// How a dispatch ended.
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Result<Message>,
}
