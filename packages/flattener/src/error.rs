//! Error types for the flattener.
//!
//! `FlattenError` covers both configuration-time failures (bad patterns,
//! missing properties) and per-document failures (malformed XML).

use thiserror::Error;

/// Main error type for the flattener library.
#[derive(Debug, Error)]
pub enum FlattenError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// An exclusion pattern is not a valid regular expression.
    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Required processor property is missing.
    #[error("[{property}] required property is missing")]
    MissingProperty { property: String },

    /// Processor property has the wrong type or an unusable value.
    #[error("[{property}] {reason}")]
    InvalidProperty { property: String, reason: String },

    /// The configured input field holds something other than a string.
    #[error("Field [{field}] of type [{found}] cannot be cast to [string]")]
    FieldType { field: String, found: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FlattenError {
    /// Shorthand for an [`FlattenError::InvalidProperty`].
    pub fn invalid_property(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProperty {
            property: property.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for flattener operations.
pub type Result<T> = std::result::Result<T, FlattenError>;
