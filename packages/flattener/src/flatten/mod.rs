//! Flattening of XML element trees into path-keyed fields.
//!
//! - [`FieldRegistry`] counts visits per base key within one traversal
//! - [`KeyStyle`] builds element, attribute and leaf-content keys
//! - [`ExclusionFilter`] suppresses keys matching configured patterns
//! - [`Flattener`] walks the tree and writes accepted fields to a sink

mod filter;
mod key;
mod registry;
mod walker;

pub use filter::ExclusionFilter;
pub use key::KeyStyle;
pub use registry::{Field, FieldRegistry};
pub use walker::{FlattenStats, Flattener};

use crate::document::OrderedFields;
use crate::error::Result;
use crate::xml::parse_document;

/// Parse `xml` and flatten it into ordered key/value pairs.
///
/// # Arguments
/// * `xml` - XML text; must be well-formed
/// * `flattener` - Key style, exclusion filter and trimming to apply
///
/// # Returns
/// Emitted fields in document order. Should two elements produce the same
/// key, the later value replaces the earlier one at the first position.
///
/// # Errors
/// Returns [`crate::FlattenError::XmlParse`] if the text is not well-formed.
///
/// # Examples
/// ```
/// use xml_flatten::flatten::{flatten_str, Flattener};
///
/// let pairs = flatten_str("<root><event>a</event><event>b</event></root>", &Flattener::default())
///     .unwrap();
/// assert_eq!(
///     pairs,
///     vec![
///         ("root-event".to_string(), "a".to_string()),
///         ("root-event2".to_string(), "b".to_string()),
///     ]
/// );
/// ```
pub fn flatten_str(xml: &str, flattener: &Flattener) -> Result<Vec<(String, String)>> {
    let root = parse_document(xml)?;
    let mut fields = OrderedFields::new();
    flattener.flatten(&root, &mut fields);
    Ok(fields.into_pairs())
}
