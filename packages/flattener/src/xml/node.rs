//! Owned XML node tree consumed by the flattener.

/// A single attribute, by local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element with its attributes and children in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Local tag name (namespace prefix stripped).
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<XmlNode>,
}

impl Element {
    /// Create an element with no attributes or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<XmlNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(XmlNode::Text(text.into()))
    }

    /// The text of the only child, if the element has exactly one child
    /// and that child is a text node.
    ///
    /// # Examples
    /// ```
    /// use xml_flatten::xml::Element;
    ///
    /// assert_eq!(Element::new("a").with_text("v").single_text(), Some("v"));
    /// assert_eq!(Element::new("a").single_text(), None);
    /// assert_eq!(
    ///     Element::new("a").with_text("v").with_child(Element::new("b")).single_text(),
    ///     None
    /// );
    /// ```
    #[must_use]
    pub fn single_text(&self) -> Option<&str> {
        match self.children.as_slice() {
            [XmlNode::Text(text)] => Some(text),
            _ => None,
        }
    }

    /// Iterate over element children, skipping text, comments and CDATA.
    pub fn child_elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(XmlNode::as_element)
    }
}

/// Releases descendants from a work list instead of recursing, so dropping a
/// deeply nested tree does not exhaust the call stack.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let XmlNode::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

/// Node kinds the flattener distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
    Comment(String),
    CData(String),
}

impl XmlNode {
    /// Return the element if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) | XmlNode::Comment(_) | XmlNode::CData(_) => None,
        }
    }
}

impl From<Element> for XmlNode {
    fn from(element: Element) -> Self {
        XmlNode::Element(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_text_requires_text_node() {
        let comment_only = Element::new("a").with_child(XmlNode::Comment("c".into()));
        assert_eq!(comment_only.single_text(), None);

        let cdata_only = Element::new("a").with_child(XmlNode::CData("c".into()));
        assert_eq!(cdata_only.single_text(), None);

        let element_only = Element::new("a").with_child(Element::new("b"));
        assert_eq!(element_only.single_text(), None);
    }

    #[test]
    fn test_child_elements() {
        let element = Element::new("root")
            .with_text("x")
            .with_child(Element::new("a"))
            .with_child(XmlNode::Comment("c".into()))
            .with_child(Element::new("b"));

        let names: Vec<_> = element.child_elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_with_attribute_keeps_order() {
        let element = Element::new("event")
            .with_attribute("time", "t")
            .with_attribute("name", "n");
        assert_eq!(element.attributes[0], Attribute::new("time", "t"));
        assert_eq!(element.attributes[1], Attribute::new("name", "n"));
    }

    #[test]
    fn test_drop_deeply_nested_tree() {
        let mut root = Element::new("n").with_text("leaf");
        for _ in 0..300_000 {
            root = Element::new("n").with_child(root).with_text("tail");
        }
        drop(root);
    }
}
