use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{DatabaseClient, DatabaseQuery, NotionError, Page};
use crate::config::Preferences;

const NOTION_VERSION: &str = "2022-06-28";
const PAGE_SIZE: u32 = 100;

pub struct NotionClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl NotionClient {
    pub fn new(prefs: &Preferences) -> Self {
        Self::with_http_client(prefs, reqwest::Client::new())
    }

    pub fn with_http_client(prefs: &Preferences, client: reqwest::Client) -> Self {
        Self {
            base_url: prefs.api_url().to_string(),
            token: prefs.notion.token.trim().to_string(),
            client,
        }
    }

    fn query_url(&self, database_id: &str) -> String {
        format!(
            "{}/databases/{}/query",
            self.base_url,
            urlencoding::encode(database_id.trim())
        )
    }
}

#[derive(Serialize)]
struct QueryBody<'a> {
    #[serde(flatten)]
    query: &'a DatabaseQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
    page_size: u32,
}

#[derive(Deserialize)]
struct QueryResponse {
    results: Vec<Page>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

#[async_trait]
impl DatabaseClient for NotionClient {
    async fn query_database(&self, query: &DatabaseQuery) -> Result<Vec<Page>, NotionError> {
        let url = self.query_url(&query.database_id);
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let body = QueryBody {
                query,
                start_cursor: cursor.as_deref(),
                page_size: PAGE_SIZE,
            };

            let resp = self
                .client
                .post(&url)
                .bearer_auth(&self.token)
                .header("Notion-Version", NOTION_VERSION)
                .json(&body)
                .send()
                .await?;

            let status = resp.status();
            let text = resp.text().await?;
            if !status.is_success() {
                return Err(NotionError::from_response(status.as_u16(), &text));
            }

            let batch: QueryResponse =
                serde_json::from_str(&text).map_err(|e| NotionError::Decode(e.to_string()))?;
            tracing::debug!(
                database = %query.database_id,
                count = batch.results.len(),
                has_more = batch.has_more,
                "query page received"
            );
            pages.extend(batch.results);

            match batch.next_cursor {
                Some(next) if batch.has_more => cursor = Some(next),
                _ => break,
            }
        }

        Ok(pages)
    }
}
