//! Element tree node and node paths.

use std::collections::HashMap;

use crate::query;
use crate::selector::Selector;
use crate::serializer;

/// Node in a parsed markup tree.
///
/// Text placement follows the XML convention: `text` is the content before
/// the first child, `tail` is the content following this element inside its
/// parent. `<p>a<b>c</b>d</p>` parses to a `p` with `text = "a"` holding a
/// `b` child with `text = "c"` and `tail = "d"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Attributes.
    pub attrs: HashMap<String, String>,
    /// Text before the first child.
    pub text: String,
    /// Text after this element, inside the parent.
    pub tail: String,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with the given tag and nothing else.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set tail content.
    #[must_use]
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Insert or replace an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.remove(name)
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    /// Whether the `class` attribute contains the given entry.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.classes().any(|c| c == name)
    }

    /// Add an entry to the `class` attribute if not already present.
    pub fn add_class(&mut self, name: &str) {
        if self.has_class(name) {
            return;
        }
        match self.attrs.get_mut("class") {
            Some(existing) if !existing.trim().is_empty() => {
                existing.push(' ');
                existing.push_str(name);
            }
            _ => {
                self.attrs.insert("class".to_owned(), name.to_owned());
            }
        }
    }

    /// Append a child element.
    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Concatenated text of this element and all descendants.
    ///
    /// Includes descendant tails but not this element's own tail.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
            out.push_str(&child.tail);
        }
    }

    /// All descendants matching `selector`, in document order (pre-order).
    ///
    /// The element itself is never a match; returned paths are relative to
    /// it. Combinators are resolved within this subtree only.
    #[must_use]
    pub fn select(&self, selector: &Selector) -> Vec<NodePath> {
        query::collect_matches(self, selector)
    }

    /// Resolve a path to a descendant.
    ///
    /// The empty path resolves to the element itself. Returns `None` if any
    /// index no longer exists.
    #[must_use]
    pub fn node(&self, path: &NodePath) -> Option<&Element> {
        let mut current = self;
        for &index in path.indices() {
            current = current.children.get(index)?;
        }
        Some(current)
    }

    /// Mutable variant of [`node`](Self::node).
    #[must_use]
    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        let mut current = self;
        for &index in path.indices() {
            current = current.children.get_mut(index)?;
        }
        Some(current)
    }

    /// Serialize this element and its subtree to markup.
    ///
    /// The element's own tail is not included.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut out = String::with_capacity(256);
        serializer::write_element(self, &mut out);
        out
    }
}

/// Path from a scope root to a descendant, as child indices.
///
/// Paths come from [`Element::select`] and resolve lazily through
/// [`Element::node`] / [`Element::node_mut`], so a path taken before a
/// mutation can be re-resolved afterwards. A path into a removed subtree
/// simply stops resolving.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// The empty path, resolving to the scope root itself.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_indices(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Child indices from the scope root down.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Whether this path resolves to the scope root itself.
    #[must_use]
    pub fn is_scope_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path to the `index`-th child of the node this path resolves to.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Number of tree levels below the scope root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> Element {
        let strong = Element::new("strong").with_text("Bold").with_tail(" text");
        let p = Element::new("p").with_children(vec![strong]);
        Element::new("div")
            .with_attr("class", "note wide")
            .with_children(vec![p])
    }

    #[test]
    fn test_attr_access() {
        let mut el = Element::new("a").with_attr("href", "/docs");
        assert_eq!(el.attr("href"), Some("/docs"));
        assert_eq!(el.attr("title"), None);

        el.set_attr("href", "/guide");
        assert_eq!(el.attr("href"), Some("/guide"));

        assert_eq!(el.remove_attr("href"), Some("/guide".to_owned()));
        assert_eq!(el.attr("href"), None);
    }

    #[test]
    fn test_classes() {
        let el = sample();
        let classes: Vec<&str> = el.classes().collect();
        assert_eq!(classes, vec!["note", "wide"]);
        assert!(el.has_class("note"));
        assert!(!el.has_class("not"));
    }

    #[test]
    fn test_add_class() {
        let mut el = Element::new("div");
        el.add_class("note");
        el.add_class("wide");
        el.add_class("note");
        assert_eq!(el.attr("class"), Some("note wide"));
    }

    #[test]
    fn test_text_content() {
        let el = sample();
        assert_eq!(el.text_content(), "Bold text");
    }

    #[test]
    fn test_text_content_excludes_own_tail() {
        let el = Element::new("span").with_text("Hello").with_tail(" World");
        assert_eq!(el.text_content(), "Hello");
    }

    #[test]
    fn test_node_resolution() {
        let el = sample();
        let path = NodePath::new().child(0).child(0);
        assert_eq!(el.node(&path).map(|n| n.tag.as_str()), Some("strong"));

        let missing = NodePath::new().child(3);
        assert!(el.node(&missing).is_none());
    }

    #[test]
    fn test_empty_path_is_scope_root() {
        let el = sample();
        let path = NodePath::new();
        assert!(path.is_scope_root());
        assert_eq!(el.node(&path).map(|n| n.tag.as_str()), Some("div"));
    }

    #[test]
    fn test_node_mut_allows_mutation() {
        let mut el = sample();
        let path = NodePath::new().child(0);
        el.node_mut(&path)
            .expect("path resolves")
            .set_attr("data-seen", "1");
        assert_eq!(el.children[0].attr("data-seen"), Some("1"));
    }

    #[test]
    fn test_path_depth() {
        let path = NodePath::new().child(1).child(0);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.indices(), &[1, 0]);
    }
}
