//! Ingest processor that flattens an XML field into its document.

use serde_json::{Map, Value};

use crate::config::{ProcessorConfig, PROCESSOR_TYPE};
use crate::document::FieldSink;
use crate::error::Result;
use crate::flatten::{FlattenStats, Flattener};
use crate::xml::parse_document;

/// Reads XML text from one field of a document and writes the flattened
/// fields back into the same document.
///
/// Exclusion patterns are compiled when the processor is created, so an
/// invalid pattern fails configuration rather than individual documents.
#[derive(Debug, Clone)]
pub struct XmlProcessor {
    tag: String,
    field: String,
    flattener: Flattener,
}

impl XmlProcessor {
    /// Create a processor from a validated configuration.
    ///
    /// # Examples
    /// ```
    /// use xml_flatten::config::ProcessorConfig;
    /// use xml_flatten::document::{FieldSink, IngestDocument};
    /// use xml_flatten::processor::XmlProcessor;
    ///
    /// let processor = XmlProcessor::new("xml-1", &ProcessorConfig::new("message")).unwrap();
    /// let mut doc = IngestDocument::new();
    /// doc.insert("message", r#"<event uid="u">v</event>"#);
    ///
    /// processor.execute(&mut doc).unwrap();
    /// assert_eq!(doc.get_field_value("event@uid").unwrap(), Some("u"));
    /// assert_eq!(doc.get_field_value("event").unwrap(), Some("v"));
    /// ```
    pub fn new(tag: impl Into<String>, config: &ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tag: tag.into(),
            field: config.field.clone(),
            flattener: Flattener::from_config(config)?,
        })
    }

    /// Create a processor from a property map (`field`, `exclude`, ...).
    pub fn from_config_map(tag: impl Into<String>, config: &Map<String, Value>) -> Result<Self> {
        Self::new(tag, &ProcessorConfig::from_config_map(config)?)
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn processor_type(&self) -> &'static str {
        PROCESSOR_TYPE
    }

    /// Flatten the configured field of `document` into `document`.
    ///
    /// Returns `Ok(None)` without touching the document when the field is
    /// absent or empty. Malformed XML is reported before anything is written.
    ///
    /// # Errors
    /// Returns [`crate::FlattenError::FieldType`] if the field is not a string
    /// and [`crate::FlattenError::XmlParse`] if it is not well-formed XML.
    pub fn execute<D>(&self, document: &mut D) -> Result<Option<FlattenStats>>
    where
        D: FieldSink + ?Sized,
    {
        let root = match document.get_field_value(&self.field)? {
            Some(content) if !content.is_empty() => parse_document(content)?,
            _ => {
                tracing::debug!(tag = %self.tag, field = %self.field, "No XML content, skipping");
                return Ok(None);
            }
        };

        let stats = self.flattener.flatten(&root, document);
        tracing::debug!(
            tag = %self.tag,
            field = %self.field,
            emitted = stats.emitted,
            excluded = stats.excluded,
            "Flattened XML field"
        );
        Ok(Some(stats))
    }
}
