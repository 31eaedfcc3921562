use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::theme::{status_color_for, ACCENT};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible_tasks();

    let title = if app.loading {
        format!(" Sprint Tasks ({}) (loading...) ", visible.len())
    } else {
        format!(" Sprint Tasks ({}) ", visible.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(title);

    if visible.is_empty() {
        let (message, color) = match (&app.error, app.loading) {
            (Some(err), _) => (err.clone(), Color::Red),
            (None, true) => ("Loading tasks...".to_string(), Color::DarkGray),
            (None, false) if !app.search.is_empty() => {
                ("No tasks match the search".to_string(), Color::DarkGray)
            }
            (None, false) => (
                "No open tasks in the current sprint".to_string(),
                Color::DarkGray,
            ),
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(message, Style::default().fg(color))))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let id_width = visible
        .iter()
        .map(|t| t.task_id.chars().count())
        .max()
        .unwrap_or(0);

    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| {
            let id_span = Span::styled(
                format!("{:<id_width$} ", task.task_id),
                Style::default().fg(ACCENT),
            );

            // Leave room for the id column and the status tag
            let status_width = task.status.chars().count() + 3;
            let max_title = (area.width as usize).saturating_sub(id_width + status_width + 4);
            let title: String = task.title.chars().take(max_title).collect();
            let title_span = Span::raw(title);

            let status_span = Span::styled(
                format!(" [{}]", task.status),
                Style::default().fg(status_color_for(&task.status)),
            );

            ListItem::new(Line::from(vec![id_span, title_span, status_span]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}
