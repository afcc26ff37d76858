//! Parsed document: the default whole-tree scope.

use crate::element::{Element, NodePath};
use crate::error::DomError;
use crate::parser;
use crate::selector::Selector;
use crate::serializer;

/// A parsed markup fragment behind a synthetic root element.
///
/// A `Document` is the default scope for selector queries: selecting on it
/// searches the entire tree, while selecting on one of its elements
/// restricts matches to that element's descendants.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Element::new(parser::ROOT_TAG),
        }
    }

    /// Parse XHTML-style markup.
    ///
    /// The fragment may contain any number of top-level elements.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] if the markup is not well-formed.
    pub fn parse(markup: &str) -> Result<Self, DomError> {
        let root = parser::parse_fragment(markup)?;
        tracing::debug!(top_level = root.children.len(), "parsed document");
        Ok(Self { root })
    }

    /// The synthetic root element.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable access to the synthetic root element.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// All elements matching `selector`, in document order.
    #[must_use]
    pub fn select(&self, selector: &Selector) -> Vec<NodePath> {
        self.root.select(selector)
    }

    /// Resolve a path returned by [`select`](Self::select).
    #[must_use]
    pub fn node(&self, path: &NodePath) -> Option<&Element> {
        self.root.node(path)
    }

    /// Mutable variant of [`node`](Self::node).
    #[must_use]
    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        self.root.node_mut(path)
    }

    /// Serialize the document back to markup.
    ///
    /// The synthetic root is not emitted.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(1024);
        out.push_str(&self.root.text);
        for child in &self.root.children {
            serializer::write_node(child, &mut out);
        }
        out
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
