//! Documents that flattened fields are written into.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FlattenError, Result};

/// Anything that can store fields by key.
pub trait FieldSink {
    /// Store `value` under `key`, replacing any previous value.
    fn set_field_value(&mut self, key: &str, value: &str);

    /// Read the string stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent and an error when the
    /// stored value is not a string.
    fn get_field_value(&self, key: &str) -> Result<Option<&str>>;
}

impl FieldSink for BTreeMap<String, String> {
    fn set_field_value(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }

    fn get_field_value(&self, key: &str) -> Result<Option<&str>> {
        Ok(self.get(key).map(String::as_str))
    }
}

/// Fields kept in first-insertion order.
///
/// Setting an existing key replaces its value in place; a key index keeps
/// both reads and writes constant time.
///
/// # Examples
/// ```
/// use xml_flatten::document::{FieldSink, OrderedFields};
///
/// let mut fields = OrderedFields::new();
/// fields.set_field_value("b", "1");
/// fields.set_field_value("a", "2");
/// fields.set_field_value("b", "3");
/// assert_eq!(
///     fields.into_pairs(),
///     vec![("b".to_string(), "3".to_string()), ("a".to_string(), "2".to_string())]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedFields {
    pairs: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl OrderedFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consume the fields, keeping their order.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

impl FieldSink for OrderedFields {
    fn set_field_value(&mut self, key: &str, value: &str) {
        if let Some(&position) = self.index.get(key) {
            if let Some((_, existing)) = self.pairs.get_mut(position) {
                *existing = value.to_string();
            }
            return;
        }
        self.index.insert(key.to_string(), self.pairs.len());
        self.pairs.push((key.to_string(), value.to_string()));
    }

    fn get_field_value(&self, key: &str) -> Result<Option<&str>> {
        Ok(self
            .index
            .get(key)
            .and_then(|&position| self.pairs.get(position))
            .map(|(_, v)| v.as_str()))
    }
}

/// A schema-less document: a JSON object of named fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngestDocument {
    fields: BTreeMap<String, Value>,
}

impl IngestDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Insert an arbitrary JSON value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl FromIterator<(String, Value)> for IngestDocument {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl FieldSink for IngestDocument {
    fn set_field_value(&mut self, key: &str, value: &str) {
        self.fields
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    fn get_field_value(&self, key: &str) -> Result<Option<&str>> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(FlattenError::FieldType {
                field: key.to_string(),
                found: json_type_name(other).to_string(),
            }),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
