//! Processor configuration: defaults, loading and validation.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{FlattenError, Result};

/// Processor type name, as registered in an ingest pipeline.
pub const PROCESSOR_TYPE: &str = "xml";

/// Default separator between element names in a flattened key.
pub const DEFAULT_SEPARATOR: &str = "-";

/// Default separator between an element key and an attribute name.
pub const DEFAULT_ATTRIBUTE_SEPARATOR: &str = "@";

/// Configuration of a single XML flattening processor.
///
/// Loaded from YAML (`field`, `exclude`, ...) or built from a JSON property
/// map through [`ProcessorConfig::from_config_map`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Name of the document field holding the XML text.
    pub field: String,

    /// Regular expressions; a key fully matching any of them is not emitted.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Separator between element names.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Separator between an element key and an attribute name.
    #[serde(default = "default_attribute_separator")]
    pub attribute_separator: String,

    /// Optional name appended (after `separator`) to leaf-content keys.
    #[serde(default)]
    pub content_suffix: Option<String>,

    /// Trim surrounding whitespace from leaf text.
    #[serde(default = "default_trim_text")]
    pub trim_text: bool,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_attribute_separator() -> String {
    DEFAULT_ATTRIBUTE_SEPARATOR.to_string()
}

fn default_trim_text() -> bool {
    true
}

const KNOWN_PROPERTIES: &[&str] = &[
    "field",
    "exclude",
    "separator",
    "attribute_separator",
    "content_suffix",
    "trim_text",
];

impl ProcessorConfig {
    /// Create a configuration for `field` with all other settings at their defaults.
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            exclude: Vec::new(),
            separator: default_separator(),
            attribute_separator: default_attribute_separator(),
            content_suffix: None,
            trim_text: default_trim_text(),
        }
    }

    /// Set the exclusion patterns.
    #[must_use]
    pub fn with_exclude(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the leaf-content suffix.
    #[must_use]
    pub fn with_content_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.content_suffix = Some(suffix.into());
        self
    }

    /// Parse and validate a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML configuration file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Build a configuration from a processor property map.
    ///
    /// `field` is a required string, `exclude` an optional list of strings.
    /// Any property this processor does not know is rejected.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use xml_flatten::config::ProcessorConfig;
    ///
    /// let map = json!({ "field": "message", "exclude": ["root-secret"] });
    /// let config = ProcessorConfig::from_config_map(map.as_object().unwrap()).unwrap();
    /// assert_eq!(config.field, "message");
    /// assert_eq!(config.exclude, vec!["root-secret".to_string()]);
    /// ```
    pub fn from_config_map(map: &Map<String, Value>) -> Result<Self> {
        if let Some(unknown) = map
            .keys()
            .find(|key| !KNOWN_PROPERTIES.contains(&key.as_str()))
        {
            return Err(FlattenError::invalid_property(
                unknown.as_str(),
                "processor does not support this property",
            ));
        }

        let field = read_string_property(map, "field")?.ok_or_else(|| {
            FlattenError::MissingProperty {
                property: "field".to_string(),
            }
        })?;

        let mut config = Self::new(field);
        config.exclude = read_string_list_property(map, "exclude")?;
        if let Some(separator) = read_string_property(map, "separator")? {
            config.separator = separator;
        }
        if let Some(separator) = read_string_property(map, "attribute_separator")? {
            config.attribute_separator = separator;
        }
        config.content_suffix = read_string_property(map, "content_suffix")?;
        if let Some(value) = map.get("trim_text") {
            config.trim_text = value.as_bool().ok_or_else(|| {
                FlattenError::invalid_property("trim_text", "property isn't a boolean")
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.field.is_empty() {
            return Err(FlattenError::invalid_property("field", "must not be empty"));
        }
        if self.separator.is_empty() {
            return Err(FlattenError::invalid_property("separator", "must not be empty"));
        }
        if self.attribute_separator.is_empty() {
            return Err(FlattenError::invalid_property(
                "attribute_separator",
                "must not be empty",
            ));
        }
        if matches!(&self.content_suffix, Some(suffix) if suffix.is_empty()) {
            return Err(FlattenError::invalid_property(
                "content_suffix",
                "must not be empty when set",
            ));
        }
        Ok(())
    }
}

fn read_string_property(map: &Map<String, Value>, property: &str) -> Result<Option<String>> {
    match map.get(property) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(FlattenError::invalid_property(
            property,
            "property isn't a string",
        )),
    }
}

fn read_string_list_property(map: &Map<String, Value>, property: &str) -> Result<Vec<String>> {
    match map.get(property) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    FlattenError::invalid_property(property, "list must only contain strings")
                })
            })
            .collect(),
        Some(_) => Err(FlattenError::invalid_property(
            property,
            "property isn't a list",
        )),
    }
}
