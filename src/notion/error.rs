use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotionError {
    /// The service answered with its JSON error object.
    #[error("{message} ({code}, HTTP {status})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    #[error("Notion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected Notion response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl NotionError {
    /// Build an error from a non-success response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(err) if !err.message.is_empty() => NotionError::Api {
                status,
                code: err.code,
                message: err.message,
            },
            _ => NotionError::Api {
                status,
                code: "unknown".into(),
                message: body.trim().chars().take(300).collect(),
            },
        }
    }
}

const DATABASE_NOT_FOUND: &str =
    "Database not found. Check the database IDs in your config and that the integration has access to them.";
const INVALID_TOKEN: &str =
    "Invalid or unauthorized Notion token. Check `notion.token` in your config.";
const PROPERTY_NOT_FOUND: &str =
    "Property not found. Check the property names in your config match the database.";

/// Turn a raw error message into something a user can act on. Messages
/// that match no known pattern are returned verbatim.
pub fn friendly_message(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if raw.contains("Could not find database") {
        DATABASE_NOT_FOUND.into()
    } else if raw.contains("API token is invalid") || lower.contains("unauthorized") {
        INVALID_TOKEN.into()
    } else if raw.contains("Could not find property") {
        PROPERTY_NOT_FOUND.into()
    } else {
        raw.into()
    }
}
