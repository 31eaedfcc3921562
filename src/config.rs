use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.notion.com/v1";

/// Everything needed to address the remote schema. Loaded once at startup
/// and shared read-only with every entry point.
#[derive(Debug, Clone, Deserialize)]
pub struct Preferences {
    pub notion: NotionConfig,
    pub sprints: SprintsConfig,
    pub tasks: TasksConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotionConfig {
    pub token: String,
    #[serde(default)]
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SprintsConfig {
    pub database_id: String,
    pub status_property: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TasksConfig {
    pub database_id: String,
    pub id_property: String,
    pub status_property: String,
    pub sprint_property: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`{0}` must not be empty")]
    Missing(&'static str),
    #[error("`{field}` is not a database id (expected 32 hex digits): {value}")]
    InvalidDatabaseId { field: &'static str, value: String },
    #[error("`notion.api_url` must be an http(s) URL: {0}")]
    InvalidApiUrl(String),
}

impl Preferences {
    pub fn api_url(&self) -> &str {
        self.notion
            .api_url
            .as_deref()
            .map(|u| u.trim_end_matches('/'))
            .unwrap_or(DEFAULT_API_URL)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("notion.token", &self.notion.token),
            ("sprints.database_id", &self.sprints.database_id),
            ("sprints.status_property", &self.sprints.status_property),
            ("tasks.database_id", &self.tasks.database_id),
            ("tasks.id_property", &self.tasks.id_property),
            ("tasks.status_property", &self.tasks.status_property),
            ("tasks.sprint_property", &self.tasks.sprint_property),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(field));
            }
        }

        for (field, value) in [
            ("sprints.database_id", &self.sprints.database_id),
            ("tasks.database_id", &self.tasks.database_id),
        ] {
            if !is_database_id(value) {
                return Err(ConfigError::InvalidDatabaseId {
                    field,
                    value: value.clone(),
                });
            }
        }

        if let Some(url) = &self.notion.api_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::InvalidApiUrl(url.clone()));
            }
        }

        Ok(())
    }
}

/// 32 hex digits, either compact or in the dashed 8-4-4-4-12 UUID layout.
fn is_database_id(value: &str) -> bool {
    let is_hex = |group: &str, len: usize| {
        group.len() == len && group.chars().all(|c| c.is_ascii_hexdigit())
    };
    let value = value.trim();
    if value.contains('-') {
        let groups: Vec<&str> = value.split('-').collect();
        groups.len() == 5
            && groups
                .into_iter()
                .zip([8, 4, 4, 4, 12])
                .all(|(group, len)| is_hex(group, len))
    } else {
        is_hex(value, 32)
    }
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sprint-tasks")
}

fn config_path() -> PathBuf {
    std::env::var_os("SPRINT_TASKS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir().join("config.toml"))
}

pub fn load_config() -> Result<Preferences> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<Preferences> {
    let contents = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config from {} (see `sprint help` for the expected format)",
            path.display()
        )
    })?;
    let prefs: Preferences = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    prefs
        .validate()
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(prefs)
}

#[cfg(test)]
pub fn test_preferences() -> Preferences {
    Preferences {
        notion: NotionConfig {
            token: "secret_test".into(),
            api_url: None,
        },
        sprints: SprintsConfig {
            database_id: "0123456789abcdef0123456789abcdef".into(),
            status_property: "Sprint status".into(),
        },
        tasks: TasksConfig {
            database_id: "fedcba98-7654-3210-fedc-ba9876543210".into(),
            id_property: "ID".into(),
            status_property: "Status".into(),
            sprint_property: "Sprint".into(),
        },
    }
}
