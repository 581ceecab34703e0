#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlashCommand {
    Clear,
    Help,
    Quit,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        // Only a bare command counts; "/help me with X" is an ordinary message.
        return match text.trim() {
            "/clear" | "/c" => Some(SlashCommand::Clear),
            "/help" | "/h" => Some(SlashCommand::Help),
            "/quit" | "/exit" | "/q" => Some(SlashCommand::Quit),
            _ => None,
        };
    }

    pub fn help_text() -> String {
        let text = r#"
COMMANDS:
- /clear (/c) - Clears the conversation on screen. A reply that is still on its way is discarded.
- /help (/h) - Shows this help. Any key closes it.
- /quit /exit (/q) - Exit arama.

HOTKEYS:
- Enter - Send your message.
- Shift+Enter, Alt+Enter, CTRL+O - Insert a line break.
- CTRL+L - Clear the conversation.
- Up/Down, CTRL+U/CTRL+D, PageUp/PageDown - Scroll.
- CTRL+C - Exit arama.
"#;

        return text.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(SlashCommand::parse("/clear"), Some(SlashCommand::Clear));
        assert_eq!(SlashCommand::parse("  /c  "), Some(SlashCommand::Clear));
        assert_eq!(SlashCommand::parse("/help"), Some(SlashCommand::Help));
        assert_eq!(SlashCommand::parse("/exit"), Some(SlashCommand::Quit));
    }

    #[test]
    fn test_parse_ignores_commands_with_arguments() {
        assert_eq!(SlashCommand::parse("/help me with X"), None);
        assert_eq!(SlashCommand::parse("/q what is rust"), None);
        assert_eq!(SlashCommand::parse("/exit now"), None);
    }

    #[test]
    fn test_parse_non_commands() {
        assert_eq!(SlashCommand::parse("clear"), None);
        assert_eq!(SlashCommand::parse("/unknown"), None);
        assert_eq!(SlashCommand::parse(""), None);
    }
}
