//! Document-order selector queries over a subtree.

use crate::element::{Element, NodePath};
use crate::selector::Selector;

/// Collect all descendants of `scope` matching `selector`, pre-order.
///
/// The scope itself is never a candidate, but it does participate in
/// combinator resolution as the topmost ancestor.
pub(crate) fn collect_matches(scope: &Element, selector: &Selector) -> Vec<NodePath> {
    let mut matches = Vec::new();
    let mut ancestors = vec![scope];
    let mut path = Vec::new();
    walk(scope, selector, &mut ancestors, &mut path, &mut matches);
    tracing::trace!(selector = %selector, count = matches.len(), "selector query");
    matches
}

fn walk<'a>(
    node: &'a Element,
    selector: &Selector,
    ancestors: &mut Vec<&'a Element>,
    path: &mut Vec<usize>,
    matches: &mut Vec<NodePath>,
) {
    for (index, child) in node.children.iter().enumerate() {
        path.push(index);
        if selector.matches(child, ancestors) {
            matches.push(NodePath::from_indices(path.clone()));
        }
        ancestors.push(child);
        walk(child, selector, ancestors, path, matches);
        ancestors.pop();
        path.pop();
    }
}
