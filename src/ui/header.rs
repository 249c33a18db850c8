use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw_header(f: &mut Frame<'_>, area: Rect, api_base: &str) {
    let mut spans = vec![Span::styled(
        "Retail Assistant",
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    )];
    if !api_base.is_empty() {
        spans.push(Span::styled(
            format!("  ·  {}", api_base),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let title = Line::from(spans);

    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), area);
}
