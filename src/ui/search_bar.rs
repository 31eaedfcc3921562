use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let line = if app.search.is_empty() {
        Line::from(Span::styled(
            "Search by ID, title or status...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::raw(app.search.as_str()))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Search ");

    f.render_widget(Paragraph::new(line).block(block), area);

    // Cursor after the typed text
    let (x, y) = cursor_position(area, &app.search);
    f.set_cursor_position((x, y));
}

/// Just past the typed text, clamped inside the border.
fn cursor_position(area: Rect, typed: &str) -> (u16, u16) {
    let typed = u16::try_from(typed.chars().count()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1).saturating_add(typed);
    let right_edge = area.x.saturating_add(area.width.saturating_sub(2));
    (x.min(right_edge), area.y.saturating_add(1))
}
