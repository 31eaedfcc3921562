pub mod client;
pub mod error;
pub mod filter;
pub mod property;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

pub use client::NotionClient;
pub use error::NotionError;
pub use filter::{Filter, Sort};
pub use property::PropertyValue;

/// One database query: the filter and sorts are sent as-is in the request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip)]
    pub database_id: String,
    pub filter: Filter,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
}

/// A record as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_properties")]
    pub properties: HashMap<String, PropertyValue>,
}

/// Properties that don't match their declared type's shape decode as
/// `Unsupported` instead of failing the whole response.
fn lenient_properties<'de, D>(deserializer: D) -> Result<HashMap<String, PropertyValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: HashMap<String, serde_json::Value> = HashMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| {
            let prop = serde_json::from_value(value).unwrap_or(PropertyValue::Unsupported);
            (name, prop)
        })
        .collect())
}

#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Run a query to completion, following pagination, and return every
    /// matching record in service order.
    async fn query_database(&self, query: &DatabaseQuery) -> Result<Vec<Page>, NotionError>;
}

#[cfg(test)]
pub mod tests;
