use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

/// Maps one key press to the event it stands for. Only an Enter without Shift or
/// Alt confirms the input; the modified forms insert a line break.
pub fn event_from_input(input: Input) -> Event {
    match input {
        Input { key: Key::Down, .. } | Input {
            key: Key::MouseScrollDown,
            ..
        } => {
            return Event::UIScrollDown;
        }
        Input { key: Key::Up, .. } | Input {
            key: Key::MouseScrollUp,
            ..
        } => {
            return Event::UIScrollUp;
        }
        Input {
            key: Key::PageDown, ..
        }
        | Input {
            key: Key::Char('d'),
            ctrl: true,
            ..
        } => {
            return Event::UIScrollPageDown;
        }
        Input {
            key: Key::PageUp, ..
        }
        | Input {
            key: Key::Char('u'),
            ctrl: true,
            ..
        } => {
            return Event::UIScrollPageUp;
        }
        Input {
            key: Key::Char('c'),
            ctrl: true,
            ..
        } => {
            return Event::KeyboardCTRLC;
        }
        Input {
            key: Key::Char('l'),
            ctrl: true,
            ..
        } => {
            return Event::KeyboardCTRLL;
        }
        Input {
            key: Key::Char('o'),
            ctrl: true,
            ..
        } => {
            return Event::KeyboardNewline;
        }
        Input {
            key: Key::Enter,
            shift: true,
            ..
        }
        | Input {
            key: Key::Enter,
            alt: true,
            ..
        } => {
            return Event::KeyboardNewline;
        }
        Input {
            key: Key::Enter, ..
        } => {
            return Event::KeyboardEnter;
        }
        input => {
            return Event::KeyboardCharInput(input);
        }
    }
}

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => {
                return Some(Event::KeyboardPaste(text));
            }
            CrosstermEvent::Resize(_, _) => {
                return Some(Event::UITick);
            }
            CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
                MouseEventKind::ScrollUp => {
                    return Some(Event::UIScrollUp);
                }
                MouseEventKind::ScrollDown => {
                    return Some(Event::UIScrollDown);
                }
                _ => {
                    return None;
                }
            },
            CrosstermEvent::Key(keyevent) => {
                if keyevent.kind == KeyEventKind::Release {
                    return None;
                }

                let key = match keyevent.code {
                    KeyCode::Char(c) => Key::Char(c),
                    KeyCode::Enter => Key::Enter,
                    KeyCode::Left => Key::Left,
                    KeyCode::Right => Key::Right,
                    KeyCode::Up => Key::Up,
                    KeyCode::Down => Key::Down,
                    KeyCode::Home => Key::Home,
                    KeyCode::End => Key::End,
                    KeyCode::PageUp => Key::PageUp,
                    KeyCode::PageDown => Key::PageDown,
                    KeyCode::Tab => Key::Tab,
                    KeyCode::Delete => Key::Delete,
                    KeyCode::F(n) => Key::F(n),
                    KeyCode::Backspace => Key::Backspace,
                    KeyCode::Esc => Key::Esc,
                    _ => return None,
                };

                let input = Input {
                    key,
                    ctrl: keyevent.modifiers.contains(KeyModifiers::CONTROL),
                    alt: keyevent.modifiers.contains(KeyModifiers::ALT),
                    shift: keyevent.modifiers.contains(KeyModifiers::SHIFT),
                };

                return Some(event_from_input(input));
            }
            _ => return None,
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(250)) => Some(Event::UITick)
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key) -> Input {
        Input {
            key,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    #[test]
    fn test_plain_enter_submits() {
        assert!(matches!(
            event_from_input(key(Key::Enter)),
            Event::KeyboardEnter
        ));
    }

    #[test]
    fn test_modified_enter_inserts_newline() {
        let shift_enter = Input {
            shift: true,
            ..key(Key::Enter)
        };
        let alt_enter = Input {
            alt: true,
            ..key(Key::Enter)
        };
        let ctrl_o = Input {
            ctrl: true,
            ..key(Key::Char('o'))
        };

        assert!(matches!(event_from_input(shift_enter), Event::KeyboardNewline));
        assert!(matches!(event_from_input(alt_enter), Event::KeyboardNewline));
        assert!(matches!(event_from_input(ctrl_o), Event::KeyboardNewline));
    }

    #[test]
    fn test_control_keys() {
        let ctrl = |c| Input {
            ctrl: true,
            ..key(Key::Char(c))
        };

        assert!(matches!(event_from_input(ctrl('c')), Event::KeyboardCTRLC));
        assert!(matches!(event_from_input(ctrl('l')), Event::KeyboardCTRLL));
        assert!(matches!(event_from_input(ctrl('u')), Event::UIScrollPageUp));
        assert!(matches!(event_from_input(ctrl('d')), Event::UIScrollPageDown));
    }

    #[test]
    fn test_characters_go_to_the_input() {
        match event_from_input(key(Key::Char('a'))) {
            Event::KeyboardCharInput(input) => assert_eq!(input.key, Key::Char('a')),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_arrows_scroll() {
        assert!(matches!(event_from_input(key(Key::Up)), Event::UIScrollUp));
        assert!(matches!(event_from_input(key(Key::Down)), Event::UIScrollDown));
    }
}
