use serde::ser::{Serialize, SerializeMap, Serializer};

/// The subset of the database filter grammar this tool needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    StatusEquals { property: String, value: String },
    StatusDoesNotEqual { property: String, value: String },
    RelationContains { property: String, page_id: String },
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn status_equals(property: &str, value: &str) -> Self {
        Filter::StatusEquals {
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn status_does_not_equal(property: &str, value: &str) -> Self {
        Filter::StatusDoesNotEqual {
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn relation_contains(property: &str, page_id: &str) -> Self {
        Filter::RelationContains {
            property: property.into(),
            page_id: page_id.into(),
        }
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Filter::StatusEquals { property, value } => {
                map.serialize_entry("property", property)?;
                map.serialize_entry("status", &Condition("equals", value))?;
            }
            Filter::StatusDoesNotEqual { property, value } => {
                map.serialize_entry("property", property)?;
                map.serialize_entry("status", &Condition("does_not_equal", value))?;
            }
            Filter::RelationContains { property, page_id } => {
                map.serialize_entry("property", property)?;
                map.serialize_entry("relation", &Condition("contains", page_id))?;
            }
            Filter::And(filters) => map.serialize_entry("and", filters)?,
            Filter::Or(filters) => map.serialize_entry("or", filters)?,
        }
        map.end()
    }
}

/// `{ "<operator>": "<operand>" }`
struct Condition<'a>(&'static str, &'a str);

impl Serialize for Condition<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

impl Sort {
    pub fn ascending(property: &str) -> Self {
        Sort {
            property: property.into(),
            direction: Direction::Ascending,
        }
    }
}
