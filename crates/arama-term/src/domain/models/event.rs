use tui_textarea::Input;

use super::Completion;

#[derive(Debug)]
pub enum Event {
    BackendUnreachable(String),
    DispatchCompleted(Completion),
    KeyboardCharInput(Input),
    KeyboardCTRLC,
    KeyboardCTRLL,
    KeyboardEnter,
    KeyboardNewline,
    KeyboardPaste(String),
    UITick,
    UIScrollDown,
    UIScrollUp,
    UIScrollPageDown,
    UIScrollPageUp,
}
