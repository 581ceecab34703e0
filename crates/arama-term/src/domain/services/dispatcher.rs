#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;

use super::validate_input;
use crate::domain::models::ChatBackend;
use crate::domain::models::Completion;
use crate::domain::models::Dispatch;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::Session;
use crate::domain::models::Snapshot;
use crate::domain::models::Ticket;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Sending,
}

/// The conversation state machine.
///
/// `submit` optimistically records the user's message and hands back the one
/// request to issue; `complete` reconciles that request's outcome with exactly
/// one assistant message. At most one dispatch is in flight at a time.
pub struct Dispatcher {
    session: Session,
}

impl Dispatcher {
    pub fn new(session: Session) -> Dispatcher {
        return Dispatcher { session };
    }

    pub fn session_id(&self) -> &str {
        return self.session.id();
    }

    pub fn state(&self) -> DispatchState {
        if self.session.is_busy() {
            return DispatchState::Sending;
        }

        return DispatchState::Idle;
    }

    pub fn is_busy(&self) -> bool {
        return self.session.is_busy();
    }

    pub fn snapshot(&self) -> Snapshot {
        return self.session.history().snapshot();
    }

    /// Returns the request to issue, or `None` when the input is blank or a
    /// dispatch is already in flight. Neither case is an error.
    pub fn submit(&mut self, text: &str) -> Option<Dispatch> {
        let text = validate_input(text)?;

        if self.session.is_busy() {
            tracing::debug!("submit ignored while a dispatch is in flight");
            return None;
        }

        if let Err(err) = self.session.history.append(Message::user(text)) {
            tracing::error!(error = %err, "could not record user message");
            return None;
        }

        let ticket = self.session.begin_dispatch();
        tracing::info!(session_id = %self.session.id, seq = ticket.seq, "dispatching message");

        return Some(Dispatch {
            ticket,
            session_id: self.session.id.to_string(),
            message: text.to_string(),
        });
    }

    pub fn complete(&mut self, completion: Completion) {
        let Completion { ticket, outcome } = completion;

        if self.session.in_flight != Some(ticket) {
            tracing::warn!(seq = ticket.seq, "ignoring completion for a dispatch that is not in flight");
            return;
        }

        // Released before anything else so no path below can leave the session busy.
        self.session.in_flight = None;

        if ticket.epoch != self.session.epoch {
            tracing::info!(
                seq = ticket.seq,
                failed = outcome.is_err(),
                "history was cleared while the dispatch was in flight, discarding reply"
            );
            return;
        }

        let message = match outcome.and_then(accept_reply) {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = ?err, seq = ticket.seq, "dispatch failed");
                Message::fallback()
            }
        };

        self.record_reply(message);
    }

    fn record_reply(&mut self, message: Message) {
        if let Err(err) = self.session.history.append(message) {
            tracing::warn!(error = %err, "reply rejected by history");
            if let Err(err) = self.session.history.append(Message::fallback()) {
                tracing::error!(error = %err, "fallback rejected by history");
            }
        }
    }

    /// Empties the history. An in-flight request is left running; its reply will
    /// be discarded when it arrives.
    pub fn clear(&mut self) {
        let dropped = self.session.history.len();
        self.session.history.clear();
        self.session.epoch += 1;
        tracing::debug!(dropped, busy = self.session.is_busy(), "history cleared");
    }

    /// Submits, waits for `backend` and completes in one step. Returns `false`
    /// when the submit was a no-op. If the returned future is dropped before the
    /// backend answers, the dispatch completes as a failure.
    pub async fn send(&mut self, backend: &dyn ChatBackend, text: &str) -> bool {
        let Some(dispatch) = self.submit(text) else {
            return false;
        };

        let pending = PendingDispatch {
            dispatcher: self,
            ticket: Some(dispatch.ticket),
        };
        let outcome = backend
            .send_message(&dispatch.session_id, &dispatch.message)
            .await;
        pending.finish(outcome);

        return true;
    }
}

/// Holds a backend reply to the history's rules: only assistant messages are
/// accepted and an empty source list is stored as `None`.
fn accept_reply(mut reply: Message) -> Result<Message> {
    if reply.role != Role::Assistant {
        bail!(format!("reply '{}' has role '{}'", reply.id, reply.role));
    }

    if reply.sources.as_ref().is_some_and(|sources| sources.is_empty()) {
        reply.sources = None;
    }

    return Ok(reply);
}

struct PendingDispatch<'a> {
    dispatcher: &'a mut Dispatcher,
    ticket: Option<Ticket>,
}

impl PendingDispatch<'_> {
    fn finish(mut self, outcome: Result<Message>) {
        if let Some(ticket) = self.ticket.take() {
            self.dispatcher.complete(Completion { ticket, outcome });
        }
    }
}

impl Drop for PendingDispatch<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.dispatcher.complete(Completion {
                ticket,
                outcome: Err(anyhow!("dispatch abandoned before the backend answered")),
            });
        }
    }
}
