//! XML node model and the parser adapter that produces it.

mod node;
mod parse;

pub use node::{Attribute, Element, XmlNode};
pub use parse::{get_tag_name, parse_document, to_element};
