//! Flattened key construction.

use crate::config::{ProcessorConfig, DEFAULT_ATTRIBUTE_SEPARATOR, DEFAULT_SEPARATOR};

/// Delimiters used when composing flattened keys.
///
/// The default style joins element names with `-`, appends attribute names
/// after `@` and uses an element's own key for its leaf text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStyle {
    separator: String,
    attribute_separator: String,
    content_suffix: Option<String>,
}

impl Default for KeyStyle {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            attribute_separator: DEFAULT_ATTRIBUTE_SEPARATOR.to_string(),
            content_suffix: None,
        }
    }
}

impl KeyStyle {
    #[must_use]
    pub fn new(separator: impl Into<String>, attribute_separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            attribute_separator: attribute_separator.into(),
            content_suffix: None,
        }
    }

    /// Key leaf text as `<key><separator><suffix>` instead of `<key>`.
    #[must_use]
    pub fn with_content_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.content_suffix = Some(suffix.into());
        self
    }

    /// Take the key delimiters from a processor configuration.
    #[must_use]
    pub fn from_config(config: &ProcessorConfig) -> Self {
        Self {
            separator: config.separator.clone(),
            attribute_separator: config.attribute_separator.clone(),
            content_suffix: config.content_suffix.clone(),
        }
    }

    /// Base key of an element: its name, prefixed by the parent key when
    /// there is one.
    ///
    /// # Examples
    /// ```
    /// use xml_flatten::flatten::KeyStyle;
    ///
    /// let style = KeyStyle::default();
    /// assert_eq!(style.base_key("", "root"), "root");
    /// assert_eq!(style.base_key("root-node", "leaf"), "root-node-leaf");
    /// ```
    #[must_use]
    pub fn base_key(&self, parent_key: &str, name: &str) -> String {
        if parent_key.is_empty() {
            name.to_string()
        } else {
            format!("{parent_key}{}{name}", self.separator)
        }
    }

    /// Apply the occurrence count to a base key.
    ///
    /// The first occurrence keeps the base key; later ones get the count
    /// appended without a separator.
    #[must_use]
    pub fn disambiguate(&self, base_key: String, count: usize) -> String {
        if count > 1 {
            format!("{base_key}{count}")
        } else {
            base_key
        }
    }

    /// Full key of an element from its parent key, name and occurrence count.
    ///
    /// # Arguments
    /// * `parent_key` - Disambiguated key of the parent, empty for the root
    /// * `name` - Local tag name of the element
    /// * `count` - Occurrence count from [`super::FieldRegistry::track`]
    ///
    /// # Returns
    /// The element key, e.g. `root-event2` for the second `event` under `root`
    ///
    /// # Examples
    /// ```
    /// use xml_flatten::flatten::KeyStyle;
    ///
    /// let style = KeyStyle::default();
    /// assert_eq!(style.build_key("", "root", 1), "root");
    /// assert_eq!(style.build_key("root", "event", 1), "root-event");
    /// assert_eq!(style.build_key("root", "event", 2), "root-event2");
    /// ```
    #[must_use]
    pub fn build_key(&self, parent_key: &str, name: &str, count: usize) -> String {
        self.disambiguate(self.base_key(parent_key, name), count)
    }

    /// Key of attribute `name` on the element keyed `element_key`.
    #[must_use]
    pub fn attribute_key(&self, element_key: &str, name: &str) -> String {
        format!("{element_key}{}{name}", self.attribute_separator)
    }

    /// Key for the leaf text of the element keyed `element_key`.
    #[must_use]
    pub fn content_key(&self, element_key: &str) -> String {
        match &self.content_suffix {
            Some(suffix) => format!("{element_key}{}{suffix}", self.separator),
            None => element_key.to_string(),
        }
    }
}
