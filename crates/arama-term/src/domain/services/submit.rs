use crate::domain::models::SlashCommand;

/// Trimmed input, or `None` when nothing is left to send.
pub fn validate_input(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    return Some(trimmed);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Submit(String),
    Command(SlashCommand),
    Ignore,
}

/// Turns the composed input into the intent a confirmation keypress stands for.
/// Owns no state; the busy guard lives in the dispatcher.
pub struct SubmitTrigger {}

impl SubmitTrigger {
    pub fn resolve(text: &str) -> Intent {
        let Some(trimmed) = validate_input(text) else {
            return Intent::Ignore;
        };

        if let Some(command) = SlashCommand::parse(trimmed) {
            return Intent::Command(command);
        }

        return Intent::Submit(trimmed.to_string());
    }
}
