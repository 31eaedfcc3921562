use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        hint("↑↓", "navigate"),
        hint("enter", "paste id"),
        hint("^y", "copy id"),
        hint("^t", "copy id: title"),
        hint("^r", "refresh"),
        hint("esc", "clear/quit"),
    ];

    spans.push(Span::raw("  "));
    if app.loading {
        spans.push(Span::styled(
            " LOADING ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    } else if let Some(at) = &app.last_refreshed {
        spans.push(Span::styled(
            format!(" {} ", at.format("%H:%M:%S")),
            Style::default().fg(Color::Black).bg(Color::DarkGray),
        ));
    }

    // The last fetch error stays up until a fetch succeeds
    if let Some((msg, _)) = &app.flash_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Yellow)));
    } else if let Some(err) = &app.error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(err.as_str(), Style::default().fg(Color::Red)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(
        format!(" {key}:{desc} "),
        Style::default().fg(Color::DarkGray),
    )
}
