use std::sync::Arc;

use anyhow::anyhow;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::models::Action;
use crate::domain::models::ChatBackendBox;
use crate::domain::models::Completion;
use crate::domain::models::Dispatch;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::Ticket;

/// Reports exactly one completion for a dispatch. Dropping the guard without
/// finishing it (abort, panic, cancelled worker) reports a failure.
struct CompletionGuard {
    ticket: Ticket,
    event_tx: Option<mpsc::UnboundedSender<Event>>,
}

impl CompletionGuard {
    fn new(ticket: Ticket, event_tx: mpsc::UnboundedSender<Event>) -> CompletionGuard {
        return CompletionGuard {
            ticket,
            event_tx: Some(event_tx),
        };
    }

    fn finish(mut self, outcome: Result<Message>) {
        if let Some(event_tx) = self.event_tx.take() {
            report(&event_tx, self.ticket, outcome);
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(event_tx) = self.event_tx.take() {
            report(
                &event_tx,
                self.ticket,
                Err(anyhow!("dispatch worker stopped before the backend answered")),
            );
        }
    }
}

fn report(event_tx: &mpsc::UnboundedSender<Event>, ticket: Ticket, outcome: Result<Message>) {
    if event_tx
        .send(Event::DispatchCompleted(Completion { ticket, outcome }))
        .is_err()
    {
        tracing::debug!(seq = ticket.seq, "event loop closed before the dispatch completed");
    }
}

async fn send_message_to_backend(
    backend: &ChatBackendBox,
    dispatch: Dispatch,
    event_tx: mpsc::UnboundedSender<Event>,
) {
    let guard = CompletionGuard::new(dispatch.ticket, event_tx);
    let outcome = backend
        .send_message(&dispatch.session_id, &dispatch.message)
        .await;
    guard.finish(outcome);
}

async fn check_backend_health(
    backend: &ChatBackendBox,
    event_tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    if let Err(err) = backend.health_check().await {
        tracing::warn!(error = ?err, "chat backend is not reachable");
        event_tx.send(Event::BackendUnreachable(err.to_string()))?;
    }

    Ok(())
}

/// Runs the network side of the client. Each dispatch is sent from its own
/// worker task and its outcome comes back to the UI loop as an event.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        backend: ChatBackendBox,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let backend_arc = Arc::new(backend);
        let mut worker: Option<JoinHandle<()>> = None;

        while let Some(action) = rx.recv().await {
            let worker_event_tx = event_tx.clone();
            let backend_worker = backend_arc.clone();
            match action {
                Action::BackendHealthCheck => {
                    tokio::spawn(async move {
                        if let Err(err) = check_backend_health(&backend_worker, &worker_event_tx).await {
                            tracing::debug!(error = ?err, "could not report backend health");
                        }
                    });
                }
                Action::Dispatch(dispatch) => {
                    worker = Some(tokio::spawn(async move {
                        send_message_to_backend(&backend_worker, dispatch, worker_event_tx).await;
                    }));
                }
            }
        }

        if let Some(worker) = worker {
            worker.abort();
        }

        Ok(())
    }
}
