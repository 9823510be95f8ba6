//! Open attribute bags and narrative tags.
//!
//! Entity attributes are loosely typed in the sector file (description,
//! occupation, planetary fields, note content, tag references), so they are
//! kept as an insertion-ordered map instead of a fixed struct. Iteration
//! order is the file order, which keeps every derived rendering
//! deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute key holding the prose description, rendered separately from the
/// generic attribute list.
pub const DESCRIPTION_KEY: &str = "description";
/// Attribute key holding tag references, rendered as cross-links.
pub const TAGS_KEY: &str = "tags";
/// Attribute key holding a free-text note body.
pub const CONTENT_KEY: &str = "content";
/// Tag detail key excluded from category lists.
const TYPES_KEY: &str = "types";

/// Insertion-ordered attribute bag of a sector entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get(DESCRIPTION_KEY).and_then(Value::as_str)
    }

    pub fn content(&self) -> Option<&str> {
        self.0.get(CONTENT_KEY).and_then(Value::as_str)
    }

    /// Tag references carried by this entity. Malformed entries (no name)
    /// are dropped rather than failing the import.
    pub fn tags(&self) -> Vec<Tag> {
        match self.0.get(TAGS_KEY) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Every attribute except the reserved description and tags keys, in
    /// bag iteration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .iter()
            .filter(|(key, _)| key.as_str() != DESCRIPTION_KEY && key.as_str() != TAGS_KEY)
            .map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Display text of an attribute value: strings verbatim, everything else as
/// its JSON form.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// A named reusable narrative element (a recurring faction, NPC, ...).
///
/// Tag identity is the case-sensitive name. Any additional array-valued
/// detail (complications, enemies, friends, places, things) becomes a
/// category list; the `types` key is reserved and never listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub details: IndexMap<String, Value>,
}

impl Tag {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            details: IndexMap::new(),
        }
    }

    /// Category lists in detail order: every array-valued key except
    /// `types`.
    pub fn list_categories(&self) -> Vec<(String, Vec<String>)> {
        self.details
            .iter()
            .filter(|(key, _)| key.as_str() != TYPES_KEY)
            .filter_map(|(key, value)| {
                value
                    .as_array()
                    .map(|items| (key.clone(), items.iter().map(value_text).collect()))
            })
            .collect()
    }
}
