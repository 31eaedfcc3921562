pub mod detail_panel;
pub mod footer;
pub mod item_list;
pub mod search_bar;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search
            Constraint::Min(6),    // list + detail
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(vertical[1]);

    search_bar::render(f, vertical[0], app);
    item_list::render(f, horizontal[0], app);
    detail_panel::render(f, horizontal[1], app);
    footer::render(f, vertical[2], app);
}
