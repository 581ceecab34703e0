use anyhow::Result;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use tokio::sync::mpsc;
use tui_textarea::TextArea;

use super::Dispatcher;
use super::Intent;
use super::SubmitTrigger;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::SlashCommand;

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

const PAGE_SIZE: usize = 10;

fn new_textarea<'a>() -> TextArea<'a> {
    let mut textarea = TextArea::default();
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Message (Enter to send, Ctrl+O for a new line) "),
    );
    textarea.set_placeholder_text("Ask anything...");
    textarea.set_cursor_line_style(Style::default());

    return textarea;
}

/// Presentation state around the dispatcher. It never touches the history
/// directly: it forwards intents and renders snapshots.
pub struct AppState<'a> {
    pub dispatcher: Dispatcher,
    pub notice: Option<String>,
    pub scroll: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub textarea: TextArea<'a>,
    pub tick: usize,
}

impl<'a> AppState<'a> {
    pub fn new(dispatcher: Dispatcher) -> AppState<'a> {
        return AppState {
            dispatcher,
            notice: None,
            scroll: 0,
            should_quit: false,
            show_help: false,
            textarea: new_textarea(),
            tick: 0,
        };
    }

    pub fn input_text(&self) -> String {
        return self.textarea.lines().join("\n");
    }

    pub fn handle_event(&mut self, event: Event, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.show_help
            && matches!(
                event,
                Event::KeyboardCharInput(_) | Event::KeyboardEnter | Event::KeyboardNewline
            )
        {
            self.show_help = false;
            return Ok(());
        }

        match event {
            Event::DispatchCompleted(completion) => {
                // A reply proves the backend is reachable again.
                if completion.outcome.is_ok() {
                    self.notice = None;
                }
                self.dispatcher.complete(completion);
                self.scroll = 0;
            }
            Event::BackendUnreachable(reason) => {
                self.notice = Some(format!("Backend unreachable: {reason}"));
            }
            Event::KeyboardEnter => {
                self.handle_submit(tx)?;
            }
            Event::KeyboardNewline => {
                self.textarea.insert_newline();
            }
            Event::KeyboardCharInput(input) => {
                self.textarea.input(input);
            }
            Event::KeyboardPaste(text) => {
                self.textarea
                    .insert_str(text.replace("\r\n", "\n").replace('\r', "\n"));
            }
            Event::KeyboardCTRLL => {
                self.clear();
            }
            Event::KeyboardCTRLC => {
                self.should_quit = true;
            }
            Event::UITick => {
                self.tick = self.tick.wrapping_add(1);
            }
            Event::UIScrollUp => {
                self.scroll = self.scroll.saturating_add(1);
            }
            Event::UIScrollDown => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            Event::UIScrollPageUp => {
                self.scroll = self.scroll.saturating_add(PAGE_SIZE);
            }
            Event::UIScrollPageDown => {
                self.scroll = self.scroll.saturating_sub(PAGE_SIZE);
            }
        }

        return Ok(());
    }

    fn handle_submit(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match SubmitTrigger::resolve(&self.input_text()) {
            Intent::Ignore => {}
            Intent::Command(SlashCommand::Clear) => {
                self.textarea = new_textarea();
                self.clear();
            }
            Intent::Command(SlashCommand::Help) => {
                self.textarea = new_textarea();
                self.show_help = true;
            }
            Intent::Command(SlashCommand::Quit) => {
                self.should_quit = true;
            }
            Intent::Submit(text) => {
                // While a dispatch is in flight the text stays in the input box.
                if let Some(dispatch) = self.dispatcher.submit(&text) {
                    self.textarea = new_textarea();
                    self.scroll = 0;
                    tx.send(Action::Dispatch(dispatch))?;
                }
            }
        }

        return Ok(());
    }

    fn clear(&mut self) {
        self.dispatcher.clear();
        self.scroll = 0;
    }
}
