//! Pattern-based exclusion of flattened keys.

use regex::Regex;

use crate::error::{FlattenError, Result};

/// Ordered list of compiled exclusion patterns.
///
/// A key is excluded when it matches a pattern in full. Patterns are
/// compiled once, when the filter is built.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    patterns: Vec<Regex>,
}

impl ExclusionFilter {
    /// Compile `patterns` in order.
    ///
    /// # Arguments
    /// * `patterns` - Regular expressions; each is anchored at both ends
    ///
    /// # Returns
    /// A filter that rejects keys matching any of the patterns in full
    ///
    /// # Errors
    /// Returns [`FlattenError::InvalidPattern`] for the first pattern that is
    /// not a valid regular expression.
    ///
    /// # Examples
    /// ```
    /// use xml_flatten::flatten::ExclusionFilter;
    ///
    /// let filter = ExclusionFilter::new(["root-event2(.*)"]).unwrap();
    /// assert!(filter.is_allowed("root-event"));
    /// assert!(!filter.is_allowed("root-event2@id"));
    /// assert!(ExclusionFilter::new(["(unclosed"]).is_err());
    /// ```
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(&format!(r"\A(?:{pattern})\z")).map_err(|source| {
                    FlattenError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// A filter that allows every key.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Whether `key` may be emitted.
    #[must_use]
    pub fn is_allowed(&self, key: &str) -> bool {
        !self.patterns.iter().any(|pattern| pattern.is_match(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
