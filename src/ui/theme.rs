use ratatui::style::Color;

use crate::model::status::StatusTag;

pub const ACCENT: Color = Color::Cyan;

pub fn status_color(tag: StatusTag) -> Color {
    match tag {
        StatusTag::InProgress => Color::Rgb(0x4F, 0x8F, 0xF7),
        StatusTag::Review => Color::Rgb(0xFF, 0xA7, 0x26),
        StatusTag::Blocked => Color::Red,
        StatusTag::Backlog => Color::Gray,
        StatusTag::Default => Color::Green,
    }
}

pub fn status_color_for(status: &str) -> Color {
    status_color(StatusTag::classify(status))
}
