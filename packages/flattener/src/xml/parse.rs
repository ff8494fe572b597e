//! Adapter from `roxmltree` documents to the owned [`Element`] tree.

use roxmltree::{Document, Node, NodeType, ParsingOptions};

use super::node::{Attribute, Element, XmlNode};
use crate::error::Result;

/// Get the tag name without namespace prefix.
///
/// # Arguments
/// * `node` - XML node
///
/// # Returns
/// Local tag name (e.g., "root" for `<ns:root>`)
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xml_flatten::xml::get_tag_name;
///
/// let doc = Document::parse(r#"<ns:root xmlns:ns="urn:x"/>"#).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "root");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Parse XML text and return its root element as an owned tree.
///
/// DTDs are accepted so that internal entity declarations resolve; no
/// validation against them takes place. CDATA sections are merged into the
/// surrounding text by the parser and therefore appear as [`XmlNode::Text`].
/// Processing instructions are dropped.
///
/// # Errors
/// Returns [`crate::FlattenError::XmlParse`] if the text is not well-formed.
///
/// # Examples
/// ```
/// use xml_flatten::xml::parse_document;
///
/// let root = parse_document("<root><a>1</a></root>").unwrap();
/// assert_eq!(root.name, "root");
/// assert_eq!(root.children.len(), 1);
/// ```
pub fn parse_document(xml: &str) -> Result<Element> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;
    Ok(to_element(doc.root_element()))
}

/// Convert a `roxmltree` element and its subtree.
///
/// Each open element sits on an explicit stack together with the iterator
/// over its remaining children, so nesting depth is not limited by the call
/// stack.
///
/// # Arguments
/// * `root` - Element node to convert
///
/// # Returns
/// Owned element with attributes, text, comments and child elements in
/// document order
pub fn to_element(root: Node<'_, '_>) -> Element {
    let mut open = vec![(root.children(), shallow_element(root))];

    while let Some((children, element)) = open.last_mut() {
        match children.next() {
            Some(node) => match node.node_type() {
                NodeType::Element => open.push((node.children(), shallow_element(node))),
                NodeType::Text => element
                    .children
                    .push(XmlNode::Text(node.text().unwrap_or_default().to_string())),
                NodeType::Comment => element
                    .children
                    .push(XmlNode::Comment(node.text().unwrap_or_default().to_string())),
                NodeType::Root | NodeType::PI => {}
            },
            None => {
                let Some((_, finished)) = open.pop() else {
                    break;
                };
                match open.last_mut() {
                    Some((_, parent)) => parent.children.push(XmlNode::Element(finished)),
                    None => return finished,
                }
            }
        }
    }

    Element::default()
}

/// Name and attributes of `node`, without children.
fn shallow_element(node: Node<'_, '_>) -> Element {
    let mut element = Element::new(get_tag_name(node));
    element.attributes = node
        .attributes()
        .map(|attr| Attribute::new(attr.name(), attr.value()))
        .collect();
    element
}
