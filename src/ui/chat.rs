use crate::chat_message::ChatBubble;
use crate::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),    // Messages
                Constraint::Length(1), // Status
                Constraint::Length(3), // Input
            ]
            .as_ref(),
        )
        .split(area);

    draw_messages(f, chunks[0], app);
    app.status_indicator.render(f, chunks[1]);
    draw_input(f, chunks[2], app);
}

/// The newest bubbles, oldest first, with one blank line between them.
/// Stops once `wanted` lines are covered so long sessions stay cheap.
pub fn recent_lines(app: &App, width: u16, wanted: usize) -> Vec<Line<'static>> {
    let mut bubbles = Vec::new();
    let mut covered = 0;
    app.log.visit_recent(|message| {
        let bubble = ChatBubble::new(message).render(width);
        covered += bubble.len() + 1;
        bubbles.push(bubble);
        covered < wanted
    });

    let mut lines = Vec::with_capacity(covered);
    for bubble in bubbles.into_iter().rev() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(bubble);
    }
    lines
}

fn draw_messages(f: &mut Frame<'_>, area: Rect, app: &App) {
    let height = area.height as usize;
    let scroll_back = app.scroll_back as usize;
    let lines = recent_lines(app, area.width, height + scroll_back);

    let max_scroll = lines.len().saturating_sub(height);
    let offset = u16::try_from(max_scroll.saturating_sub(scroll_back)).unwrap_or(u16::MAX);

    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title("Message");

    let inner_width = area.width.saturating_sub(4);
    let text_width = app.input.width() as u16;
    let scroll_offset = text_width.saturating_sub(inner_width);

    let input = Line::from(vec![
        Span::styled("→ ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.input.as_str(), Style::default().fg(Color::White)),
    ]);

    f.render_widget(
        Paragraph::new(input).block(block).scroll((0, scroll_offset)),
        area,
    );

    let cursor_x = area.x + 3 + text_width - scroll_offset;
    f.set_cursor_position((cursor_x, area.y + 1));
}
