//! Battle card document schema.
//!
//! The document is kept as an untyped JSON mapping so that path operations can
//! address any depth uniformly. The typed structs below are read views used for
//! rendering; they are never the source of truth.

use crate::{accessor, DocumentError, Path, PathError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub row: Vec<String>,
    #[serde(default)]
    pub details: Details,
}

/// Detail text attached to a row.
///
/// Current documents store a list of bullet lines. Older documents stored one
/// free-form string; it is still accepted so those documents keep rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Details {
    Bullets(Vec<String>),
    Blob(String),
}

impl Default for Details {
    fn default() -> Self {
        Details::Bullets(Vec::new())
    }
}

impl Details {
    pub fn is_legacy_blob(&self) -> bool {
        matches!(self, Details::Blob(_))
    }
}

/// Root mapping from card id to card.
///
/// Key order is insertion order and doubles as navigation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document(Value);

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Adopt a JSON value, which must be a mapping.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        if value.is_object() {
            Ok(Self(value))
        } else {
            Err(DocumentError::NotAMapping {
                found: accessor::value_type_name(&value),
            })
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.0)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn len(&self) -> usize {
        self.cards().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cards(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    pub fn get(&self, path: &Path) -> Option<&Value> {
        accessor::get(&self.0, path)
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut Value> {
        if path.is_empty() {
            // The root stays a mapping; callers mutate below it.
            return None;
        }
        accessor::get_mut(&mut self.0, path)
    }

    pub fn set(&mut self, path: &Path, value: Value) -> Result<(), PathError> {
        accessor::set(&mut self.0, path, value)
    }

    pub fn delete(&mut self, path: &Path) -> Result<Value, PathError> {
        accessor::delete(&mut self.0, path)
    }

    /// Card ids in document order.
    pub fn card_ids(&self) -> impl Iterator<Item = &str> {
        self.cards()
            .into_iter()
            .flat_map(|m| m.keys().map(String::as_str))
    }

    pub fn first_card_id(&self) -> Option<&str> {
        self.card_ids().next()
    }

    pub fn contains_card(&self, card_id: &str) -> bool {
        self.cards().is_some_and(|m| m.contains_key(card_id))
    }

    /// Read a card through the typed schema.
    ///
    /// `Ok(None)` when the id is unknown; `Err` when the stored value does not
    /// fit the schema.
    pub fn card(&self, card_id: &str) -> Result<Option<Card>, serde_json::Error> {
        match self.cards().and_then(|m| m.get(card_id)) {
            Some(value) => Card::deserialize(value).map(Some),
            None => Ok(None),
        }
    }

    fn tab_values(&self, card_id: &str) -> &[Value] {
        self.cards()
            .and_then(|m| m.get(card_id))
            .and_then(|card| card.get("tabs"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tab ids of one card, in document order.
    pub fn tab_ids(&self, card_id: &str) -> Vec<&str> {
        self.tab_values(card_id)
            .iter()
            .filter_map(|tab| tab.get("id").and_then(Value::as_str))
            .collect()
    }

    pub fn has_tab(&self, card_id: &str, tab_id: &str) -> bool {
        self.tab_ids(card_id).contains(&tab_id)
    }

    /// Every tab id across all cards.
    pub fn all_tab_ids(&self) -> Vec<&str> {
        self.card_ids().flat_map(|id| self.tab_ids(id)).collect()
    }

    /// Position of a tab within its card.
    pub fn tab_index(&self, card_id: &str, tab_id: &str) -> Option<usize> {
        self.tab_ids(card_id).iter().position(|id| *id == tab_id)
    }

    pub fn row_count(&self, card_id: &str, tab_id: &str) -> Option<usize> {
        self.tab_values(card_id)
            .iter()
            .find(|tab| tab.get("id").and_then(Value::as_str) == Some(tab_id))
            .map(|tab| {
                tab.get("content")
                    .and_then(Value::as_array)
                    .map(Vec::len)
                    .unwrap_or(0)
            })
    }
}
