use anyhow::anyhow;
use chrono::Utc;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use super::*;
use crate::domain::models::Completion;
use crate::domain::models::Message;
use crate::domain::models::Session;
use crate::domain::models::FALLBACK_TEXT;

fn app_state<'a>() -> AppState<'a> {
    return AppState::new(Dispatcher::new(Session::new()));
}

fn type_text(app_state: &mut AppState, text: &str) {
    app_state.textarea.insert_str(text);
}

#[test]
fn test_dispatches_on_enter() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    type_text(&mut app_state, "  Hello ");
    app_state.handle_event(Event::KeyboardEnter, &tx).unwrap();

    match rx.try_recv().unwrap() {
        Action::Dispatch(dispatch) => {
            assert_eq!(dispatch.message, "Hello");
            assert_eq!(dispatch.session_id, app_state.dispatcher.session_id());
        }
        other => panic!("unexpected action: {other:?}"),
    }
    assert!(app_state.input_text().is_empty());
    assert!(app_state.dispatcher.is_busy());
    assert_eq!(app_state.dispatcher.snapshot().len(), 1);
}

#[test]
fn test_ignores_blank_submits() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    type_text(&mut app_state, "   ");
    app_state.handle_event(Event::KeyboardEnter, &tx).unwrap();

    assert!(rx.try_recv().is_err());
    assert!(app_state.dispatcher.snapshot().is_empty());
    assert!(!app_state.dispatcher.is_busy());
}

#[test]
fn test_keeps_input_while_busy() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    type_text(&mut app_state, "A");
    app_state.handle_event(Event::KeyboardEnter, &tx).unwrap();
    type_text(&mut app_state, "B");
    app_state.handle_event(Event::KeyboardEnter, &tx).unwrap();

    assert!(matches!(rx.try_recv().unwrap(), Action::Dispatch(_)));
    assert!(rx.try_recv().is_err());
    assert_eq!(app_state.input_text(), "B");
    assert_eq!(app_state.dispatcher.snapshot().len(), 1);
}

#[test]
fn test_reconciles_completions() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    type_text(&mut app_state, "Weather?");
    app_state.handle_event(Event::KeyboardEnter, &tx).unwrap();
    let Action::Dispatch(dispatch) = rx.try_recv().unwrap() else {
        panic!("expected a dispatch");
    };

    app_state.scroll = 5;
    app_state
        .handle_event(
            Event::DispatchCompleted(Completion {
                ticket: dispatch.ticket,
                outcome: Err(anyhow!("connection reset")),
            }),
            &tx,
        )
        .unwrap();

    let snapshot = app_state.dispatcher.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[1].content, FALLBACK_TEXT);
    assert!(!app_state.dispatcher.is_busy());
    assert_eq!(app_state.scroll, 0);
}

#[test]
fn test_clears_with_slash_command_and_hotkey() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    type_text(&mut app_state, "Hello");
    app_state.handle_event(Event::KeyboardEnter, &tx).unwrap();
    let Action::Dispatch(dispatch) = rx.try_recv().unwrap() else {
        panic!("expected a dispatch");
    };

    type_text(&mut app_state, "/clear");
    app_state.handle_event(Event::KeyboardEnter, &tx).unwrap();
    assert!(app_state.dispatcher.snapshot().is_empty());
    assert!(app_state.input_text().is_empty());

    app_state
        .handle_event(
            Event::DispatchCompleted(Completion {
                ticket: dispatch.ticket,
                outcome: Ok(Message::assistant("a1", "late", Utc::now(), false, vec![])),
            }),
            &tx,
        )
        .unwrap();
    assert!(app_state.dispatcher.snapshot().is_empty());

    type_text(&mut app_state, "Again");
    app_state.handle_event(Event::KeyboardEnter, &tx).unwrap();
    app_state.handle_event(Event::KeyboardCTRLL, &tx).unwrap();
    assert!(app_state.dispatcher.snapshot().is_empty());
}

#[test]
fn test_inserts_newlines_instead_of_submitting() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    type_text(&mut app_state, "line one");
    app_state.handle_event(Event::KeyboardNewline, &tx).unwrap();
    type_text(&mut app_state, "line two");

    assert!(rx.try_recv().is_err());
    assert_eq!(app_state.input_text(), "line one\nline two");
}

#[test]
fn test_shows_and_dismisses_help() {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    type_text(&mut app_state, "/help");
    app_state.handle_event(Event::KeyboardEnter, &tx).unwrap();
    assert!(app_state.show_help);

    let input = Input {
        key: Key::Char('x'),
        ctrl: false,
        alt: false,
        shift: false,
    };
    app_state
        .handle_event(Event::KeyboardCharInput(input), &tx)
        .unwrap();
    assert!(!app_state.show_help);
    assert!(app_state.input_text().is_empty());
}

#[test]
fn test_quits() {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state.handle_event(Event::KeyboardCTRLC, &tx).unwrap();
    assert!(app_state.should_quit);
}

#[test]
fn test_scrolls_without_underflow() {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state.handle_event(Event::UIScrollDown, &tx).unwrap();
    assert_eq!(app_state.scroll, 0);
    app_state.handle_event(Event::UIScrollPageUp, &tx).unwrap();
    app_state.handle_event(Event::UIScrollUp, &tx).unwrap();
    assert_eq!(app_state.scroll, 11);
}

#[test]
fn test_records_backend_notices() {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state
        .handle_event(Event::BackendUnreachable("refused".to_string()), &tx)
        .unwrap();
    assert_eq!(app_state.notice.as_deref(), Some("Backend unreachable: refused"));
}

#[test]
fn test_clears_the_notice_after_a_reply() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state
        .handle_event(Event::BackendUnreachable("refused".to_string()), &tx)
        .unwrap();
    type_text(&mut app_state, "Hello");
    app_state.handle_event(Event::KeyboardEnter, &tx).unwrap();
    let Action::Dispatch(dispatch) = rx.try_recv().unwrap() else {
        panic!("expected a dispatch");
    };

    app_state
        .handle_event(
            Event::DispatchCompleted(Completion {
                ticket: dispatch.ticket,
                outcome: Ok(Message::assistant("a1", "Hi", Utc::now(), false, vec![])),
            }),
            &tx,
        )
        .unwrap();
    assert!(app_state.notice.is_none());
}

#[test]
fn test_keeps_the_notice_after_a_failure() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state
        .handle_event(Event::BackendUnreachable("refused".to_string()), &tx)
        .unwrap();
    type_text(&mut app_state, "Hello");
    app_state.handle_event(Event::KeyboardEnter, &tx).unwrap();
    let Action::Dispatch(dispatch) = rx.try_recv().unwrap() else {
        panic!("expected a dispatch");
    };

    app_state
        .handle_event(
            Event::DispatchCompleted(Completion {
                ticket: dispatch.ticket,
                outcome: Err(anyhow!("connection refused")),
            }),
            &tx,
        )
        .unwrap();
    assert!(app_state.notice.is_some());
}

#[test]
fn test_pastes_crlf_text_as_single_line_breaks() {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state
        .handle_event(Event::KeyboardPaste("one\r\ntwo\rthree".to_string()), &tx)
        .unwrap();
    assert_eq!(app_state.input_text(), "one\ntwo\nthree");
}
