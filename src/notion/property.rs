use serde::Deserialize;

/// A typed property value, keyed by the `type` tag the service puts on
/// every property. Types this tool can't display land in `Unsupported`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    UniqueId {
        unique_id: UniqueId,
    },
    Number {
        number: Option<f64>,
    },
    Formula {
        formula: FormulaResult,
    },
    Status {
        status: Option<SelectOption>,
    },
    Select {
        select: Option<SelectOption>,
    },
    Relation {
        #[serde(default)]
        relation: Vec<PageRef>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UniqueId {
    pub prefix: Option<String>,
    pub number: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaResult {
    String { string: Option<String> },
    Number { number: Option<f64> },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageRef {
    pub id: String,
}

impl PropertyValue {
    /// Render the value as display text. Never fails; anything without a
    /// textual form is the empty string.
    pub fn display_text(&self) -> String {
        match self {
            PropertyValue::Title { title: spans } | PropertyValue::RichText { rich_text: spans } => {
                spans.iter().map(|s| s.plain_text.as_str()).collect()
            }
            PropertyValue::UniqueId { unique_id } => unique_id.display_text(),
            PropertyValue::Number { number } => number.map(|n| n.to_string()).unwrap_or_default(),
            PropertyValue::Formula { formula } => match formula {
                FormulaResult::String { string } => string.clone().unwrap_or_default(),
                FormulaResult::Number { number } => {
                    number.map(|n| n.to_string()).unwrap_or_default()
                }
                FormulaResult::Other => String::new(),
            },
            PropertyValue::Status { status: option } | PropertyValue::Select { select: option } => {
                option.as_ref().map(|o| o.name.clone()).unwrap_or_default()
            }
            PropertyValue::Relation { .. } => String::new(),
            PropertyValue::Unsupported => String::new(),
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, PropertyValue::Title { .. })
    }
}

#[cfg(test)]
impl PropertyValue {
    pub fn related_ids(&self) -> Vec<&str> {
        match self {
            PropertyValue::Relation { relation } => relation.iter().map(|r| r.id.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

impl UniqueId {
    fn display_text(&self) -> String {
        let prefix = self.prefix.as_deref().filter(|p| !p.is_empty());
        match (prefix, self.number) {
            (Some(prefix), Some(number)) => format!("{prefix}-{number}"),
            (None, Some(number)) => number.to_string(),
            (_, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> PropertyValue {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn rich_text_concatenates_spans() {
        let prop = parse(json!({
            "id": "x",
            "type": "rich_text",
            "rich_text": [
                { "type": "text", "plain_text": "Fix " },
                { "type": "text", "plain_text": "login" },
                { "type": "mention", "plain_text": " bug" }
            ]
        }));
        assert_eq!(prop.display_text(), "Fix login bug");
    }

    #[test]
    fn empty_title_is_empty() {
        let prop = parse(json!({ "type": "title", "title": [] }));
        assert!(prop.is_title());
        assert_eq!(prop.display_text(), "");
    }

    #[test]
    fn unique_id_with_and_without_prefix() {
        let prefixed = parse(json!({ "type": "unique_id", "unique_id": { "prefix": "TASK", "number": 7 } }));
        assert_eq!(prefixed.display_text(), "TASK-7");

        let bare = parse(json!({ "type": "unique_id", "unique_id": { "prefix": null, "number": 42 } }));
        assert_eq!(bare.display_text(), "42");

        let empty_prefix = parse(json!({ "type": "unique_id", "unique_id": { "prefix": "", "number": 3 } }));
        assert_eq!(empty_prefix.display_text(), "3");

        let no_number = parse(json!({ "type": "unique_id", "unique_id": { "prefix": "TASK", "number": null } }));
        assert_eq!(no_number.display_text(), "");
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(parse(json!({ "type": "number", "number": 7.0 })).display_text(), "7");
        assert_eq!(parse(json!({ "type": "number", "number": 7.5 })).display_text(), "7.5");
        assert_eq!(parse(json!({ "type": "number", "number": null })).display_text(), "");
    }

    #[test]
    fn formula_results() {
        let text = parse(json!({ "type": "formula", "formula": { "type": "string", "string": "T-1" } }));
        assert_eq!(text.display_text(), "T-1");

        let number = parse(json!({ "type": "formula", "formula": { "type": "number", "number": 12 } }));
        assert_eq!(number.display_text(), "12");

        let boolean = parse(json!({ "type": "formula", "formula": { "type": "boolean", "boolean": true } }));
        assert_eq!(boolean.display_text(), "");
    }

    #[test]
    fn status_and_select_read_option_name() {
        let status = parse(json!({ "type": "status", "status": { "id": "1", "name": "Doing", "color": "blue" } }));
        assert_eq!(status.display_text(), "Doing");

        let unset = parse(json!({ "type": "select", "select": null }));
        assert_eq!(unset.display_text(), "");
    }

    #[test]
    fn relation_and_unknown_types_are_empty() {
        let relation = parse(json!({ "type": "relation", "relation": [{ "id": "s1" }], "has_more": false }));
        assert_eq!(relation.display_text(), "");
        assert_eq!(relation.related_ids(), vec!["s1"]);

        let people = parse(json!({ "type": "people", "people": [] }));
        assert_eq!(people, PropertyValue::Unsupported);
        assert_eq!(people.display_text(), "");
    }
}
