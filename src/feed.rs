use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::app::Action;
use crate::config::Preferences;
use crate::notion::{error::friendly_message, DatabaseClient};
use crate::sprint;

/// Runs fetch cycles in the background and reports them on the action
/// channel, tagged with a generation number.
///
/// Starting a cycle aborts the one still in flight, if any. A result that
/// slips through anyway carries an older generation and is dropped by the
/// receiver, so only the latest cycle ever replaces what is displayed.
pub struct TaskFeed {
    client: Arc<dyn DatabaseClient>,
    prefs: Arc<Preferences>,
    action_tx: mpsc::UnboundedSender<Action>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl TaskFeed {
    pub fn new(
        client: Arc<dyn DatabaseClient>,
        prefs: Arc<Preferences>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            client,
            prefs,
            action_tx,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Start a new cycle, cancelling any superseded one. Returns its generation.
    pub fn revalidate(&mut self) -> u64 {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                tracing::debug!(generation = self.generation, "cancelling superseded fetch");
            }
            previous.abort();
        }

        self.generation += 1;
        let generation = self.generation;
        let client = Arc::clone(&self.client);
        let prefs = Arc::clone(&self.prefs);
        let tx = self.action_tx.clone();

        self.in_flight = Some(tokio::spawn(async move {
            tracing::info!(generation, "fetch cycle started");
            let action = match sprint::load_tasks(client.as_ref(), &prefs).await {
                Ok(tasks) => {
                    tracing::info!(generation, tasks = tasks.len(), "fetch cycle finished");
                    Action::TasksLoaded { generation, tasks }
                }
                Err(e) => {
                    tracing::warn!(generation, error = %e, "fetch cycle failed");
                    Action::FetchFailed {
                        generation,
                        message: friendly_message(&e.to_string()),
                    }
                }
            };
            let _ = tx.send(action);
        }));

        generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_preferences;
    use crate::notion::tests::{sprint_page, task_page, MockDatabase};

    fn feed_with(db: MockDatabase) -> (TaskFeed, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let feed = TaskFeed::new(Arc::new(db), Arc::new(test_preferences()), tx);
        (feed, rx)
    }

    #[tokio::test]
    async fn delivers_loaded_tasks() {
        let prefs = test_preferences();
        let db = MockDatabase::new()
            .with_pages(&prefs.sprints.database_id, vec![sprint_page("S1", "Current")])
            .with_pages(
                &prefs.tasks.database_id,
                vec![task_page("t1", "TASK-1", "Login", "Doing", &["S1"])],
            );
        let (mut feed, mut rx) = feed_with(db);

        let generation = feed.revalidate();

        match rx.recv().await {
            Some(Action::TasksLoaded { generation: g, tasks }) => {
                assert_eq!(g, generation);
                assert_eq!(tasks.len(), 1);
                assert_eq!(tasks[0].task_id, "TASK-1");
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failures_are_translated() {
        let db = MockDatabase::new().with_failure(401, "API token is invalid.");
        let (mut feed, mut rx) = feed_with(db);

        feed.revalidate();

        match rx.recv().await {
            Some(Action::FetchFailed { message, .. }) => {
                assert!(message.starts_with("Invalid or unauthorized Notion token"));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn each_revalidation_advances_the_generation() {
        let (mut feed, _rx) = feed_with(MockDatabase::new());
        assert_eq!(feed.generation(), 0);

        let first = feed.revalidate();
        let second = feed.revalidate();

        assert_eq!((first, second), (1, 2));
        assert!(!feed.is_current(first));
        assert!(feed.is_current(second));
    }
}
