//! Tree walk that turns an element tree into flattened fields.

use std::rc::Rc;

use super::filter::ExclusionFilter;
use super::key::KeyStyle;
use super::registry::FieldRegistry;
use crate::config::ProcessorConfig;
use crate::document::FieldSink;
use crate::error::Result;
use crate::xml::Element;

/// Counts collected during one flattening pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenStats {
    /// Elements visited.
    pub elements: usize,
    /// Fields written to the sink.
    pub emitted: usize,
    /// Fields suppressed by the exclusion filter.
    pub excluded: usize,
}

/// Reusable flattening settings.
///
/// Holds no per-document state, so one `Flattener` can serve many documents
/// and many threads; every call to [`Flattener::flatten`] gets its own
/// [`FieldRegistry`].
#[derive(Debug, Clone)]
pub struct Flattener {
    style: KeyStyle,
    filter: ExclusionFilter,
    trim_text: bool,
}

impl Default for Flattener {
    fn default() -> Self {
        Self {
            style: KeyStyle::default(),
            filter: ExclusionFilter::allow_all(),
            trim_text: true,
        }
    }
}

impl Flattener {
    #[must_use]
    pub fn new(style: KeyStyle, filter: ExclusionFilter) -> Self {
        Self {
            style,
            filter,
            trim_text: true,
        }
    }

    /// Build from a processor configuration, compiling its exclusion patterns.
    pub fn from_config(config: &ProcessorConfig) -> Result<Self> {
        Ok(Self {
            style: KeyStyle::from_config(config),
            filter: ExclusionFilter::new(&config.exclude)?,
            trim_text: config.trim_text,
        })
    }

    /// Whether leaf text is trimmed before it is written.
    #[must_use]
    pub fn with_trim_text(mut self, trim_text: bool) -> Self {
        self.trim_text = trim_text;
        self
    }

    /// Flatten the tree under `root` into `sink`.
    pub fn flatten<S>(&self, root: &Element, sink: &mut S) -> FlattenStats
    where
        S: FieldSink + ?Sized,
    {
        TreeWalker::new(self).walk(root, sink)
    }
}

/// Traversal state for a single document.
struct TreeWalker<'f> {
    flattener: &'f Flattener,
    registry: FieldRegistry,
    stats: FlattenStats,
}

impl<'f> TreeWalker<'f> {
    fn new(flattener: &'f Flattener) -> Self {
        Self {
            flattener,
            registry: FieldRegistry::new(),
            stats: FlattenStats::default(),
        }
    }

    /// Pre-order, depth-first walk over element nodes.
    ///
    /// Children are pushed in reverse so they pop in document order; each
    /// carries its parent's disambiguated key, which siblings share.
    fn walk<S>(mut self, root: &Element, sink: &mut S) -> FlattenStats
    where
        S: FieldSink + ?Sized,
    {
        let flattener = self.flattener;
        let style = &flattener.style;
        let mut pending: Vec<(&Element, Rc<str>)> = vec![(root, Rc::from(""))];

        while let Some((element, parent_key)) = pending.pop() {
            self.stats.elements += 1;

            let base_key = style.base_key(&parent_key, &element.name);
            let count = self.registry.track(&base_key);
            let key = style.disambiguate(base_key, count);

            for attribute in &element.attributes {
                let attribute_key = style.attribute_key(&key, &attribute.name);
                self.emit(sink, &attribute_key, &attribute.value);
            }

            if let Some(text) = element.single_text() {
                let text = if flattener.trim_text {
                    text.trim()
                } else {
                    text
                };
                let content_key = style.content_key(&key);
                self.emit(sink, &content_key, text);
            }

            let key: Rc<str> = Rc::from(key);
            for child in element.child_elements().rev() {
                pending.push((child, Rc::clone(&key)));
            }
        }

        tracing::debug!(
            elements = self.stats.elements,
            emitted = self.stats.emitted,
            excluded = self.stats.excluded,
            distinct_keys = self.registry.len(),
            "Flattened document"
        );

        self.stats
    }

    fn emit<S>(&mut self, sink: &mut S, key: &str, value: &str)
    where
        S: FieldSink + ?Sized,
    {
        if self.flattener.filter.is_allowed(key) {
            tracing::trace!(key, "Emitting field");
            sink.set_field_value(key, value);
            self.stats.emitted += 1;
        } else {
            tracing::trace!(key, "Field excluded");
            self.stats.excluded += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::OrderedFields;
    use crate::xml::{parse_document, XmlNode};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn flatten_xml(xml: &str, flattener: &Flattener) -> BTreeMap<String, String> {
        let root = parse_document(xml).unwrap();
        let mut fields: BTreeMap<String, String> = BTreeMap::new();
        flattener.flatten(&root, &mut fields);
        fields
    }

    fn pairs(items: &[(&str, &str)]) -> BTreeMap<String, String> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_attributes_and_leaf_text() {
        let fields = flatten_xml(
            r#"<event time="t" name="n" uid="u">v</event>"#,
            &Flattener::default(),
        );
        assert_eq!(
            fields,
            pairs(&[
                ("event", "v"),
                ("event@name", "n"),
                ("event@time", "t"),
                ("event@uid", "u"),
            ])
        );
    }

    #[test]
    fn test_repeated_siblings_are_numbered() {
        let fields = flatten_xml(
            "<root><event>a</event><event>b</event><event>c</event></root>",
            &Flattener::default(),
        );
        assert_eq!(
            fields,
            pairs(&[("root-event", "a"), ("root-event2", "b"), ("root-event3", "c")])
        );
    }

    #[test]
    fn test_suffix_propagates_to_descendants() {
        let fields = flatten_xml(
            "<r><item><name>x</name><tag>1</tag><tag>2</tag></item>\
             <item><name>y</name><tag>3</tag></item></r>",
            &Flattener::default(),
        );
        assert_eq!(
            fields,
            pairs(&[
                ("r-item-name", "x"),
                ("r-item-tag", "1"),
                ("r-item-tag2", "2"),
                ("r-item2-name", "y"),
                ("r-item2-tag", "3"),
            ])
        );
    }

    #[test]
    fn test_counts_non_adjacent_repeats() {
        let fields = flatten_xml(
            "<r><a>1</a><b>x</b><a>2</a></r>",
            &Flattener::default(),
        );
        assert_eq!(fields, pairs(&[("r-a", "1"), ("r-a2", "2"), ("r-b", "x")]));
    }

    #[test]
    fn test_same_name_at_different_paths_is_not_numbered() {
        let fields = flatten_xml(
            "<r><a><v>1</v></a><b><v>2</v></b></r>",
            &Flattener::default(),
        );
        assert_eq!(fields, pairs(&[("r-a-v", "1"), ("r-b-v", "2")]));
    }

    #[test]
    fn test_mixed_content_emits_nothing_for_parent() {
        let fields = flatten_xml(
            "<r><p>Hello <b>world</b>!</p><empty/><blank></blank></r>",
            &Flattener::default(),
        );
        assert_eq!(fields, pairs(&[("r-p-b", "world")]));
    }

    #[test]
    fn test_comment_only_child_is_not_content() {
        let fields = flatten_xml("<r><a><!-- c --></a></r>", &Flattener::default());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_exclusion_is_per_field() {
        let filter = ExclusionFilter::new(["root-event2(.*)"]).unwrap();
        let flattener = Flattener::new(KeyStyle::default(), filter);
        let fields = flatten_xml(
            r#"<root><event>a</event><event id="2">b</event><event>c</event></root>"#,
            &flattener,
        );
        assert_eq!(fields, pairs(&[("root-event", "a"), ("root-event3", "c")]));
    }

    #[test]
    fn test_excluded_element_still_yields_children() {
        let filter = ExclusionFilter::new(["r-a"]).unwrap();
        let flattener = Flattener::new(KeyStyle::default(), filter);
        let fields = flatten_xml(
            r#"<r><a id="1"><b>x</b></a></r>"#,
            &flattener,
        );
        assert_eq!(fields, pairs(&[("r-a-b", "x"), ("r-a@id", "1")]));
    }

    #[test]
    fn test_excluded_fields_still_count() {
        let filter = ExclusionFilter::new(["r-a"]).unwrap();
        let flattener = Flattener::new(KeyStyle::default(), filter);
        let root = parse_document("<r><a>1</a><a>2</a></r>").unwrap();
        let mut fields: BTreeMap<String, String> = BTreeMap::new();
        let stats = flattener.flatten(&root, &mut fields);

        assert_eq!(fields, pairs(&[("r-a2", "2")]));
        assert_eq!(
            stats,
            FlattenStats {
                elements: 3,
                emitted: 1,
                excluded: 1,
            }
        );
    }

    #[test]
    fn test_trim_text() {
        let xml = "<r><a>  padded\n</a></r>";
        assert_eq!(
            flatten_xml(xml, &Flattener::default()),
            pairs(&[("r-a", "padded")])
        );
        assert_eq!(
            flatten_xml(xml, &Flattener::default().with_trim_text(false)),
            pairs(&[("r-a", "  padded\n")])
        );
    }

    #[test]
    fn test_content_suffix_style() {
        let style = KeyStyle::default().with_content_suffix("content");
        let flattener = Flattener::new(style, ExclusionFilter::allow_all());
        let fields = flatten_xml(
            "<root><event>a</event><event>b</event></root>",
            &flattener,
        );
        assert_eq!(
            fields,
            pairs(&[("root-event-content", "a"), ("root-event2-content", "b")])
        );
    }

    #[test]
    fn test_document_order_of_emission() {
        let root = parse_document(
            r#"<r x="0"><a y="1">1</a><b><c>2</c></b><a>3</a></r>"#,
        )
        .unwrap();
        let mut fields = OrderedFields::new();
        Flattener::default().flatten(&root, &mut fields);

        let keys: Vec<_> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["r@x", "r-a@y", "r-a", "r-b-c", "r-a2"]);
    }

    #[test]
    fn test_fresh_registry_per_document() {
        let flattener = Flattener::default();
        let root = parse_document("<r><a>1</a><a>2</a></r>").unwrap();

        let mut first: BTreeMap<String, String> = BTreeMap::new();
        flattener.flatten(&root, &mut first);
        let mut second: BTreeMap<String, String> = BTreeMap::new();
        flattener.flatten(&root, &mut second);

        assert_eq!(first, second);
    }

    #[test]
    fn test_hand_built_cdata_child_is_not_content() {
        let root = Element::new("r")
            .with_child(Element::new("a").with_child(XmlNode::CData("raw".into())));
        let mut fields: BTreeMap<String, String> = BTreeMap::new();
        Flattener::default().flatten(&root, &mut fields);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_deep_nesting() {
        let mut root = Element::new("n").with_text("leaf");
        for _ in 0..2_000 {
            root = Element::new("n").with_child(root);
        }
        let mut fields = OrderedFields::new();
        let stats = Flattener::default().flatten(&root, &mut fields);

        assert_eq!(stats.elements, 2_001);
        let pairs = fields.into_pairs();
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].0.starts_with("n-n-n"));
        assert_eq!(pairs[0].1, "leaf");
    }
}
