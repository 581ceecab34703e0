use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::task;

use super::render;
use crate::domain::models::Action;
use crate::domain::models::ChatBackendBox;
use crate::domain::models::Event;
use crate::domain::models::Session;
use crate::domain::services::ActionsService;
use crate::domain::services::AppState;
use crate::domain::services::Dispatcher;
use crate::domain::services::EventsService;

/// Puts the terminal back into a usable state. Safe to call more than once.
pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        cursor::Show
    );
}

async fn run_ui<B: Backend>(
    terminal: &mut Terminal<B>,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut app_state = AppState::new(Dispatcher::new(Session::new()));
    tracing::info!(session_id = %app_state.dispatcher.session_id(), "session started");

    loop {
        terminal.draw(|frame| render::draw(frame, &mut app_state))?;

        let event = events.next().await?;
        app_state.handle_event(event, &tx)?;

        if app_state.should_quit {
            break;
        }
    }

    tracing::info!(
        session_id = %app_state.dispatcher.session_id(),
        messages = app_state.dispatcher.snapshot().len(),
        "session ended"
    );

    return Ok(());
}

/// Runs the interactive client until the user quits.
pub async fn start_loop(backend: ChatBackendBox) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    let worker_event_tx = event_tx.clone();
    background_futures.spawn(async move {
        return ActionsService::start(backend, worker_event_tx, &mut action_rx).await;
    });
    action_tx.send(Action::BackendHealthCheck)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut events = EventsService::new(event_rx);
    let result = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(anyhow::Error::from(err)),
            None => Ok(()),
        },
        res = run_ui(&mut terminal, action_tx, &mut events) => res,
    );

    // Held until here so the event channel stays open for the whole session.
    drop(event_tx);
    background_futures.abort_all();

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return result;
}
