use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use super::{DatabaseClient, DatabaseQuery, Filter, NotionError, Page};

/// An in-memory database service that evaluates filters against fixture
/// pages and records every query it receives.
pub struct MockDatabase {
    databases: HashMap<String, Vec<Page>>,
    pub queries: Arc<Mutex<Vec<DatabaseQuery>>>,
    failure: Option<(u16, String)>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self {
            databases: HashMap::new(),
            queries: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    pub fn with_pages(mut self, database_id: &str, pages: Vec<Page>) -> Self {
        self.databases.insert(database_id.to_string(), pages);
        self
    }

    /// Every query answers with the given service error.
    pub fn with_failure(mut self, status: u16, message: &str) -> Self {
        self.failure = Some((status, message.to_string()));
        self
    }

    pub fn recorded(&self) -> Vec<DatabaseQuery> {
        self.queries.lock().unwrap().clone()
    }
}

fn matches(filter: &Filter, page: &Page) -> bool {
    let text = |property: &str| {
        page.properties
            .get(property)
            .map(|p| p.display_text())
            .unwrap_or_default()
    };
    match filter {
        Filter::StatusEquals { property, value } => text(property) == *value,
        Filter::StatusDoesNotEqual { property, value } => text(property) != *value,
        Filter::RelationContains { property, page_id } => page
            .properties
            .get(property)
            .map(|p| p.related_ids().contains(&page_id.as_str()))
            .unwrap_or(false),
        Filter::And(filters) => filters.iter().all(|f| matches(f, page)),
        Filter::Or(filters) => filters.iter().any(|f| matches(f, page)),
    }
}

#[async_trait]
impl DatabaseClient for MockDatabase {
    async fn query_database(&self, query: &DatabaseQuery) -> Result<Vec<Page>, NotionError> {
        self.queries.lock().unwrap().push(query.clone());

        if let Some((status, message)) = &self.failure {
            let body = json!({ "object": "error", "status": status, "code": "mock", "message": message });
            return Err(NotionError::from_response(*status, &body.to_string()));
        }

        let Some(pages) = self.databases.get(&query.database_id) else {
            return Err(NotionError::from_response(
                404,
                &json!({
                    "code": "object_not_found",
                    "message": format!("Could not find database with ID: {}.", query.database_id)
                })
                .to_string(),
            ));
        };

        let mut results: Vec<Page> = pages
            .iter()
            .filter(|p| matches(&query.filter, p))
            .cloned()
            .collect();
        for sort in query.sorts.iter().rev() {
            results.sort_by_key(|p| {
                p.properties
                    .get(&sort.property)
                    .map(|v| v.display_text())
                    .unwrap_or_default()
            });
        }
        Ok(results)
    }
}

pub fn page(id: &str, properties: serde_json::Value) -> Page {
    serde_json::from_value(json!({ "id": id, "url": format!("https://www.notion.so/{id}"), "properties": properties }))
        .unwrap()
}

pub fn sprint_page(id: &str, status: &str) -> Page {
    page(
        id,
        json!({
            "Name": { "type": "title", "title": [{ "plain_text": format!("Sprint {id}") }] },
            "Sprint status": { "type": "status", "status": { "name": status } }
        }),
    )
}

pub fn task_page(id: &str, task_id: &str, title: &str, status: &str, sprint_ids: &[&str]) -> Page {
    let relation: Vec<_> = sprint_ids.iter().map(|s| json!({ "id": s })).collect();
    page(
        id,
        json!({
            "Task": { "type": "title", "title": [{ "plain_text": title }] },
            "ID": { "type": "rich_text", "rich_text": [{ "plain_text": task_id }] },
            "Status": { "type": "status", "status": { "name": status } },
            "Sprint": { "type": "relation", "relation": relation }
        }),
    )
}

#[tokio::test]
async fn mock_records_queries_and_filters() {
    let db = MockDatabase::new().with_pages(
        "sprints",
        vec![sprint_page("S1", "Current"), sprint_page("S2", "Planned")],
    );
    let query = DatabaseQuery {
        database_id: "sprints".into(),
        filter: Filter::status_equals("Sprint status", "Current"),
        sorts: vec![],
    };

    let pages = db.query_database(&query).await.unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].id, "S1");
    assert_eq!(db.recorded(), vec![query]);
}

#[tokio::test]
async fn mock_unknown_database_reports_not_found() {
    let db = MockDatabase::new();
    let query = DatabaseQuery {
        database_id: "missing".into(),
        filter: Filter::status_equals("Status", "Current"),
        sorts: vec![],
    };
    let err = db.query_database(&query).await.unwrap_err();
    assert!(err.to_string().contains("Could not find database"));
}

#[test]
fn page_without_properties_decodes() {
    let page: Page = serde_json::from_value(json!({ "id": "p" })).unwrap();
    assert!(page.properties.is_empty());
    assert!(page.url.is_none());
}
