use crate::constants::USER_INDENT;
use crate::models::{Message, Sender};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// Renders a message as a bordered chat bubble. User bubbles are indented
/// so the two sides of the conversation read apart.
#[derive(Debug, Clone)]
pub struct ChatBubble<'a> {
    message: &'a Message,
}

impl<'a> ChatBubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    pub fn render(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let style = self.base_style();

        self.render_header(&mut lines, style);
        self.render_content(&mut lines, width, style);
        self.render_footer(&mut lines, style);

        lines
    }

    fn is_user(&self) -> bool {
        self.message.sender == Sender::User
    }

    fn indent(&self) -> &'static str {
        if self.is_user() {
            USER_INDENT
        } else {
            ""
        }
    }

    fn base_style(&self) -> Style {
        let style = Style::default().fg(if self.is_user() {
            Color::Rgb(255, 223, 128)
        } else {
            Color::Rgb(144, 238, 144)
        });

        if !self.is_user() && self.message.text.starts_with("Error: ") {
            return style.fg(Color::Red);
        }

        style
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let timestamp = self.message.timestamp.format("%H:%M").to_string();
        let who = if self.is_user() { "you" } else { "bot" };

        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(who.to_string(), style.add_modifier(Modifier::BOLD)),
            Span::styled(" ", style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
        ]));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, width: u16, style: Style) {
        let indent = self.indent();
        let wrap_width = (width as usize)
            .saturating_sub(indent.width() + 2)
            .max(1);

        // wrap() drops the only line of whitespace-only input; keep a row for it.
        let wrapped = wrap(&self.message.text, wrap_width);
        let rows: Vec<String> = if wrapped.is_empty() {
            vec![String::new()]
        } else {
            wrapped.into_iter().map(|row| row.into_owned()).collect()
        };

        for row in rows {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled(row, style),
            ]));
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }
}
