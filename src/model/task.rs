use serde::{Deserialize, Serialize};

use crate::config::Preferences;
use crate::notion::Page;

pub const NO_ID: &str = "[No ID]";
pub const UNTITLED: &str = "[Untitled]";
pub const NO_STATUS: &str = "[No Status]";

/// A task flattened for display. Built fresh on every fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Record id assigned by the service
    pub id: String,
    pub task_id: String,
    pub title: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Task {
    /// Flatten a raw record. Missing, empty or unreadable fields fall back
    /// to bracketed placeholders; this never fails.
    pub fn from_page(page: &Page, prefs: &Preferences) -> Self {
        let text = |property: &str| {
            page.properties
                .get(property)
                .map(|p| p.display_text())
                .unwrap_or_default()
        };

        // The title property has a fixed role in the schema, so it is
        // found by type rather than by name.
        let title = page
            .properties
            .values()
            .find(|p| p.is_title())
            .map(|p| p.display_text())
            .unwrap_or_default();

        Task {
            id: page.id.clone(),
            task_id: or_placeholder(text(&prefs.tasks.id_property), NO_ID),
            title: or_placeholder(title, UNTITLED),
            status: or_placeholder(text(&prefs.tasks.status_property), NO_STATUS),
            url: page.url.clone(),
        }
    }

    /// `"<task id>: <title>"`, the form copied for commit messages and chat.
    pub fn summary_line(&self) -> String {
        format!("{}: {}", self.task_id, self.title)
    }

    /// Every whitespace-separated term must appear in the id, title or status.
    pub fn matches_search(&self, query: &str) -> bool {
        let haystack = format!("{} {} {}", self.task_id, self.title, self.status).to_lowercase();
        query
            .split_whitespace()
            .all(|term| haystack.contains(&term.to_lowercase()))
    }
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}
