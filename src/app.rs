use std::time::Instant;

use chrono::{DateTime, Local};

use crate::event::KeyAction;
use crate::feed::TaskFeed;
use crate::model::task::Task;
use crate::util::clipboard::Clipboard;

#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyAction),
    Tick,
    TasksLoaded { generation: u64, tasks: Vec<Task> },
    FetchFailed { generation: u64, message: String },
    Quit,
}

pub struct App {
    pub tasks: Vec<Task>,
    pub search: String,
    /// Index into `visible_tasks()`
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub flash_message: Option<(String, Instant)>,
    pub last_refreshed: Option<DateTime<Local>>,
    pub should_quit: bool,
    /// Task id to print on exit, for the shell to pick up.
    pub paste_on_exit: Option<String>,
    feed: TaskFeed,
    clipboard: Box<dyn Clipboard>,
}

impl App {
    pub fn new(feed: TaskFeed, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            tasks: Vec::new(),
            search: String::new(),
            selected: 0,
            loading: false,
            error: None,
            flash_message: None,
            last_refreshed: None,
            should_quit: false,
            paste_on_exit: None,
            feed,
            clipboard,
        }
    }

    /// Start a fetch cycle. Whatever is on screen stays there until it
    /// completes.
    pub fn refresh(&mut self) {
        self.loading = true;
        self.feed.revalidate();
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.matches_search(&self.search))
            .collect()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected).copied()
    }

    pub async fn update(&mut self, action: Action) {
        // Clear flash message after 3 seconds
        if let Some((_, t)) = &self.flash_message {
            if t.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }

        match action {
            Action::Key(key) => self.handle_key(key).await,
            Action::Tick => {}
            Action::TasksLoaded { generation, tasks } => {
                if !self.feed.is_current(generation) {
                    tracing::debug!(
                        generation,
                        current = self.feed.generation(),
                        "dropping stale fetch result"
                    );
                    return;
                }
                self.tasks = tasks;
                self.loading = false;
                self.error = None;
                self.last_refreshed = Some(Local::now());
                self.clamp_selection();
            }
            Action::FetchFailed { generation, message } => {
                if !self.feed.is_current(generation) {
                    tracing::debug!(
                        generation,
                        current = self.feed.generation(),
                        "dropping stale fetch error"
                    );
                    return;
                }
                self.loading = false;
                self.error = Some(message);
            }
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    async fn handle_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyAction::Down => {
                let count = self.visible_tasks().len();
                if count > 0 && self.selected < count - 1 {
                    self.selected += 1;
                }
            }
            KeyAction::Char(c) => {
                self.search.push(c);
                self.selected = 0;
            }
            KeyAction::Backspace => {
                if self.search.pop().is_some() {
                    self.selected = 0;
                }
            }
            KeyAction::ClearSearch => self.clear_search(),
            KeyAction::Escape => {
                if self.search.is_empty() {
                    self.should_quit = true;
                } else {
                    self.clear_search();
                }
            }
            KeyAction::PasteId => {
                if let Some(task_id) = self.selected_task().map(|t| t.task_id.clone()) {
                    self.paste_on_exit = Some(task_id);
                    self.should_quit = true;
                }
            }
            KeyAction::CopyId => {
                if let Some(text) = self.selected_task().map(|t| t.task_id.clone()) {
                    self.copy(text).await;
                }
            }
            KeyAction::CopySummary => {
                if let Some(text) = self.selected_task().map(Task::summary_line) {
                    self.copy(text).await;
                }
            }
            KeyAction::Refresh => self.refresh(),
        }
    }

    fn clear_search(&mut self) {
        self.search.clear();
        self.selected = 0;
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_tasks().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    async fn copy(&mut self, text: String) {
        let message = match self.clipboard.copy(&text).await {
            Ok(()) => format!("Copied \"{text}\""),
            Err(e) => {
                tracing::warn!(error = %e, "copy failed");
                format!("Copy failed: {e}")
            }
        };
        self.flash_message = Some((message, Instant::now()));
    }
}
