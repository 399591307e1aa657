use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque tag identifier. Discord sends snowflakes as strings, but integers
/// are accepted and written back in the form they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagId {
    Text(String),
    Number(u64),
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for TagId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for TagId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

/// A tag offered by a forum channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumTag {
    pub id: TagId,
    pub name: String,
}

/// The subset of `GET /channels/{id}` this crate reads.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelMetadata {
    #[serde(default)]
    pub available_tags: Vec<ForumTag>,
}

/// A forum thread exactly as the search endpoint returned it.
///
/// The record is kept as raw JSON (key order included) so it can be written
/// back unmodified. The accessors read the few fields the CSV export needs and
/// fall back to defaults when a field is missing or has an unexpected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Thread(Value);

impl Default for Thread {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl From<Value> for Thread {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl Thread {
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Thread name, or `"Unknown"` when absent or not a string.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.0
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
    }

    /// Message count, or 0. Non-negative floats are truncated.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn messages(&self) -> u64 {
        let Some(count) = self.0.get("message_count") else {
            return 0;
        };
        count
            .as_u64()
            .or_else(|| {
                count
                    .as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .unwrap_or(0)
    }

    /// Applied tag IDs in server order. Entries that are neither strings nor
    /// unsigned integers are kept as their JSON text, so they still show up
    /// as unresolved tags.
    #[must_use]
    pub fn tag_ids(&self) -> Vec<TagId> {
        self.0
            .get("applied_tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().map(tag_id_from_value).collect())
            .unwrap_or_default()
    }

    /// Date portion of the creation timestamp (text before the first `T`),
    /// or `"Unknown"` when the timestamp is missing or has no `T`.
    #[must_use]
    pub fn created_date(&self) -> &str {
        self.0
            .get("thread_metadata")
            .and_then(|m| m.get("create_timestamp"))
            .and_then(Value::as_str)
            .and_then(|ts| ts.split_once('T'))
            .map_or("Unknown", |(date, _)| date)
    }
}

fn tag_id_from_value(value: &Value) -> TagId {
    match value {
        Value::String(s) => TagId::Text(s.clone()),
        other => other
            .as_u64()
            .map_or_else(|| TagId::Text(other.to_string()), TagId::Number),
    }
}

/// One page of `GET /channels/{id}/threads/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadSearchPage {
    #[serde(default)]
    pub threads: Vec<Thread>,
    #[serde(default)]
    pub has_more: bool,
}

/// Which half of the channel a fetch covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchivalState {
    Active,
    Archived,
}

impl ArchivalState {
    #[must_use]
    pub fn is_archived(self) -> bool {
        matches!(self, Self::Archived)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    /// Value of the `archived` query parameter.
    #[must_use]
    pub fn query_value(self) -> &'static str {
        if self.is_archived() {
            "true"
        } else {
            "false"
        }
    }
}

impl fmt::Display for ArchivalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
