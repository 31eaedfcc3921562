//! The fetch pipeline: find the current sprints, query the open tasks
//! related to them, and flatten each record for display.

use crate::config::Preferences;
use crate::model::task::Task;
use crate::notion::{DatabaseClient, DatabaseQuery, Filter, NotionError, Page, Sort};

pub const CURRENT_SPRINT_STATUS: &str = "Current";
pub const DONE_STATUS: &str = "Done";

/// Ids of every sprint whose status is "Current", in service order.
pub async fn locate_current_sprints(
    client: &dyn DatabaseClient,
    prefs: &Preferences,
) -> Result<Vec<String>, NotionError> {
    let query = DatabaseQuery {
        database_id: prefs.sprints.database_id.clone(),
        filter: Filter::status_equals(&prefs.sprints.status_property, CURRENT_SPRINT_STATUS),
        sorts: Vec::new(),
    };
    let pages = client.query_database(&query).await?;
    Ok(pages.into_iter().map(|p| p.id).collect())
}

/// Not done, and related to at least one of the given sprints.
/// Returns `None` when there are no sprints to relate to.
pub fn build_task_filter(prefs: &Preferences, sprint_ids: &[String]) -> Option<Filter> {
    let relation = |id: &String| Filter::relation_contains(&prefs.tasks.sprint_property, id);
    let in_sprint = match sprint_ids {
        [] => return None,
        [only] => relation(only),
        many => Filter::Or(many.iter().map(relation).collect()),
    };
    Some(Filter::And(vec![
        Filter::status_does_not_equal(&prefs.tasks.status_property, DONE_STATUS),
        in_sprint,
    ]))
}

/// Raw task records for the given sprints, sorted by task id. No sprints
/// means no tasks, and no request is made.
pub async fn query_active_tasks(
    client: &dyn DatabaseClient,
    prefs: &Preferences,
    sprint_ids: &[String],
) -> Result<Vec<Page>, NotionError> {
    let Some(filter) = build_task_filter(prefs, sprint_ids) else {
        return Ok(Vec::new());
    };
    let query = DatabaseQuery {
        database_id: prefs.tasks.database_id.clone(),
        filter,
        sorts: vec![Sort::ascending(&prefs.tasks.id_property)],
    };
    client.query_database(&query).await
}

/// One full fetch cycle.
pub async fn load_tasks(
    client: &dyn DatabaseClient,
    prefs: &Preferences,
) -> Result<Vec<Task>, NotionError> {
    let sprint_ids = locate_current_sprints(client, prefs).await?;
    tracing::info!(sprints = sprint_ids.len(), "located current sprints");

    let pages = query_active_tasks(client, prefs, &sprint_ids).await?;
    tracing::info!(tasks = pages.len(), "queried active tasks");

    Ok(pages.iter().map(|p| Task::from_page(p, prefs)).collect())
}
