//! The recursive directive applier.

use sel_dom::{Document, Element};

use crate::directive::{Action, Directive, Rule};
use crate::handler::{Flow, HandlerError};

/// Apply a directive against the whole document.
///
/// Equivalent to [`apply_within`] on the document root: every rule queries
/// the full tree.
///
/// # Errors
///
/// Propagates the first handler error unmodified. Effects of handlers that
/// already ran remain applied.
pub fn apply(directive: &mut Directive, document: &mut Document) -> Result<(), HandlerError> {
    apply_within(directive, document.root_mut())
}

/// Apply a directive with `scope` as the root of all selector queries.
///
/// Sequences are applied in order against the same scope. Rules run in
/// insertion order; matches are visited in document order, and each match
/// runs the rule's full action list before the next match is visited. When
/// a handler returns [`Flow::Descend`], or an action is a nested
/// directive, the recursion is scoped to the matched element, not to the
/// original root.
///
/// A selector matching nothing is silently skipped.
///
/// # Errors
///
/// Propagates the first handler error unmodified.
pub fn apply_within(directive: &mut Directive, scope: &mut Element) -> Result<(), HandlerError> {
    match directive {
        Directive::Sequence(items) => {
            for item in items {
                apply_within(item, scope)?;
            }
            Ok(())
        }
        Directive::Rules(rules) => {
            for rule in rules {
                apply_rule(rule, scope)?;
            }
            Ok(())
        }
    }
}

fn apply_rule(rule: &mut Rule, scope: &mut Element) -> Result<(), HandlerError> {
    let matches = scope.select(rule.selector());
    if matches.is_empty() {
        tracing::trace!(selector = %rule.selector(), "no matches for rule");
        return Ok(());
    }
    tracing::debug!(selector = %rule.selector(), count = matches.len(), "applying rule");

    for (index, path) in matches.iter().enumerate() {
        for action in rule.actions_mut() {
            // Resolve fresh for every action; an earlier handler may have
            // restructured the tree under this path.
            let Some(element) = scope.node_mut(path) else {
                tracing::debug!(?path, "match no longer resolves, skipping");
                break;
            };
            match action {
                Action::Run(handler) => {
                    if let Flow::Descend(mut nested) = handler.on_match(element, index)? {
                        apply_within(&mut nested, element)?;
                    }
                }
                Action::Descend(nested) => apply_within(nested, element)?,
            }
        }
    }
    Ok(())
}
