//! Per-traversal occurrence counting for base keys.

use std::collections::HashMap;

/// A base key and how many times it has been seen so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    count: usize,
}

impl Field {
    /// Create a field on its first sighting.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 1,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Record another occurrence and return the new count.
    pub fn increase(&mut self) -> usize {
        self.count += 1;
        self.count
    }
}

/// Registry of [`Field`]s keyed by exact base key.
///
/// One registry belongs to one traversal; there is no removal.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    fields: HashMap<String, Field>,
}

impl FieldRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit to `base_key` and return its occurrence count,
    /// including this visit.
    ///
    /// # Arguments
    /// * `base_key` - Element key before any numeric suffix; compared exactly
    ///
    /// # Returns
    /// 1 on the first sighting, then 2, 3, ... on each later call
    ///
    /// # Examples
    /// ```
    /// use xml_flatten::flatten::FieldRegistry;
    ///
    /// let mut registry = FieldRegistry::new();
    /// assert_eq!(registry.track("root-event"), 1);
    /// assert_eq!(registry.track("root-event"), 2);
    /// assert_eq!(registry.track("root-other"), 1);
    /// ```
    pub fn track(&mut self, base_key: &str) -> usize {
        if let Some(field) = self.fields.get_mut(base_key) {
            return field.increase();
        }
        let field = Field::new(base_key);
        let count = field.count();
        self.fields.insert(base_key.to_string(), field);
        count
    }

    /// Look up a field without counting a visit.
    #[must_use]
    pub fn get(&self, base_key: &str) -> Option<&Field> {
        self.fields.get(base_key)
    }

    /// Number of distinct base keys seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
