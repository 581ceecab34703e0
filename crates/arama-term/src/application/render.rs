#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::Message;
use crate::domain::models::SlashCommand;
use crate::domain::services::AppState;
use crate::domain::services::DispatchState;

const INDENT: &str = "  ";
const SOURCE_INDENT: &str = "      ";
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Greedy word wrap on character count. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = vec![];

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut chars = word.chars().collect::<Vec<char>>();
            while chars.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = chars.split_off(width);
                lines.push(chars.into_iter().collect());
                chars = rest;
            }

            let word_len = chars.len();
            let needed = if current_len == 0 {
                word_len
            } else {
                current_len + 1 + word_len
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(chars);
            current_len += word_len;
        }

        lines.push(current);
    }

    return lines;
}

fn indented(text: &str, indent: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    return wrap(text, width.saturating_sub(indent.len()))
        .into_iter()
        .map(|line| return Line::from(Span::styled(format!("{indent}{line}"), style)))
        .collect();
}

pub fn message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
    let (author, author_style) = if message.is_user() {
        ("You", Style::default().fg(Color::Green))
    } else {
        ("Assistant", Style::default().fg(Color::Blue))
    };
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines = vec![Line::from(vec![
        Span::styled(author.to_string(), author_style.add_modifier(Modifier::BOLD)),
        Span::styled(format!(" · {}", message.format_time()), dim),
    ])];

    lines.extend(indented(&message.content, INDENT, width, Style::default()));

    if message.used_search {
        lines.push(Line::from(Span::styled(
            format!("{INDENT}[web search used]"),
            dim.add_modifier(Modifier::ITALIC),
        )));
    }

    if !message.sources().is_empty() {
        lines.push(Line::from(Span::styled(format!("{INDENT}Sources:"), dim)));
        for (idx, source) in message.sources().iter().enumerate() {
            lines.extend(indented(
                &format!("[{}] {}", idx + 1, source.title),
                INDENT,
                width,
                Style::default().add_modifier(Modifier::BOLD),
            ));
            if !source.snippet.is_empty() {
                lines.extend(indented(&source.snippet, SOURCE_INDENT, width, dim));
            }
            lines.push(Line::from(Span::styled(
                format!("{SOURCE_INDENT}{}", source.url),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            )));
        }
    }

    lines.push(Line::from(""));

    return lines;
}

pub fn greeting_lines(width: usize) -> Vec<Line<'static>> {
    let text = r#"
Hello!

I'm your search assistant. I answer from what I know and from a fresh web search when the question needs it.

Try asking:
- What's the weather today?
- Latest technology news
- How do I learn Python?
"#;

    return indented(text.trim(), "", width, Style::default());
}

pub fn help_lines(width: usize) -> Vec<Line<'static>> {
    return indented(&SlashCommand::help_text(), "", width, Style::default());
}

pub fn history_lines(
    messages: &[Message],
    busy: bool,
    tick: usize,
    width: usize,
) -> Vec<Line<'static>> {
    if messages.is_empty() && !busy {
        return greeting_lines(width);
    }

    let mut lines = messages
        .iter()
        .flat_map(|message| return message_lines(message, width))
        .collect::<Vec<Line<'static>>>();

    if busy {
        lines.push(Line::from(vec![
            Span::styled(
                "Assistant".to_string(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" · {} Thinking...", SPINNER[tick % SPINNER.len()]),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    return lines;
}

fn status_line(app_state: &AppState) -> Line<'static> {
    if let Some(notice) = &app_state.notice {
        return Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Red),
        ));
    }

    return Line::from(Span::styled(
        format!(
            "session {} · /help for commands · Ctrl+L clears · Ctrl+C quits",
            app_state.dispatcher.session_id()
        ),
        Style::default().fg(Color::DarkGray),
    ));
}

/// Rows for the input box: its lines plus the border, between 3 and 8.
fn input_height(line_count: usize) -> u16 {
    return u16::try_from(line_count)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .clamp(3, 8);
}

pub fn draw(frame: &mut Frame, app_state: &mut AppState) {
    let input_height = input_height(app_state.textarea.lines().len());
    let [header_area, history_area, status_area, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(input_height),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                " arama ".to_string(),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" smart search assistant"),
        ])),
        header_area,
    );

    let width = history_area.width as usize;
    let lines = if app_state.show_help {
        help_lines(width)
    } else {
        history_lines(
            &app_state.dispatcher.snapshot(),
            app_state.dispatcher.state() == DispatchState::Sending,
            app_state.tick,
            width,
        )
    };

    let max_scroll = lines.len().saturating_sub(history_area.height as usize);
    app_state.scroll = app_state.scroll.min(max_scroll);
    let top = (max_scroll - app_state.scroll).min(u16::MAX as usize) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((top, 0)), history_area);

    frame.render_widget(Paragraph::new(status_line(app_state)), status_area);
    frame.render_widget(&app_state.textarea, input_area);
}
