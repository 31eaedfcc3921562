use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::theme::{status_color_for, ACCENT};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Details ");

    let Some(task) = app.selected_task() else {
        f.render_widget(block, area);
        return;
    };

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));
    let mut lines = vec![
        Line::from(vec![label("ID: "), Span::raw(task.task_id.as_str())]),
        Line::from(vec![
            label("Status: "),
            Span::styled(
                task.status.as_str(),
                Style::default().fg(status_color_for(&task.status)),
            ),
        ]),
    ];

    if let Some(url) = &task.url {
        lines.push(Line::from(vec![
            label("URL: "),
            Span::styled(url.as_str(), Style::default().fg(Color::Blue)),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw(task.title.as_str()));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
