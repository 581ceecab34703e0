use chrono::Utc;
use uuid::Uuid;

use super::History;
use super::Ticket;

/// One client-side conversation.
///
/// Created once at startup. It is mutated only through the dispatcher, which is
/// its sole owner; the UI reads snapshots of the history.
#[derive(Debug)]
pub struct Session {
    pub(crate) id: String,
    pub(crate) history: History,
    pub(crate) in_flight: Option<Ticket>,
    pub(crate) epoch: u64,
    pub(crate) next_seq: u64,
}

impl Default for Session {
    fn default() -> Self {
        return Session::new();
    }
}

impl Session {
    pub fn new() -> Session {
        return Session {
            id: Session::create_id(),
            history: History::new(),
            in_flight: None,
            epoch: 0,
            next_seq: 0,
        };
    }

    pub fn create_id() -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        return format!("session_{}_{}", Utc::now().timestamp_millis(), &suffix[..9]);
    }

    pub fn id(&self) -> &str {
        return &self.id;
    }

    pub fn history(&self) -> &History {
        return &self.history;
    }

    /// True exactly while one dispatch is outstanding.
    pub fn is_busy(&self) -> bool {
        return self.in_flight.is_some();
    }

    pub(crate) fn begin_dispatch(&mut self) -> Ticket {
        let ticket = Ticket {
            seq: self.next_seq,
            epoch: self.epoch,
        };
        self.next_seq += 1;
        self.in_flight = Some(ticket);

        return ticket;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = Session::new();
        assert!(!session.id().is_empty());
        assert!(session.id().starts_with("session_"));
        assert!(session.history().is_empty());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_session_ids_are_distinct() {
        let a = Session::new();
        let b = Session::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_session_id_is_stable() {
        let session = Session::new();
        let id = session.id().to_string();
        assert_eq!(session.id(), id);
    }

    #[test]
    fn test_begin_dispatch_issues_sequential_tickets() {
        let mut session = Session::new();
        let first = session.begin_dispatch();
        session.in_flight = None;
        let second = session.begin_dispatch();

        assert_eq!(first.seq + 1, second.seq);
        assert_eq!(first.epoch, second.epoch);
        assert!(session.is_busy());
    }
}
