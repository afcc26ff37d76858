//! Directive model: selector rules and the actions attached to them.

use std::fmt;

use sel_dom::{Element, Selector};

use crate::handler::{Flow, Handler, HandlerError};

/// A declarative description of what to do to a tree.
///
/// A directive is either an ordered [`Sequence`](Self::Sequence) of
/// directives applied one after another against the same scope, or a list
/// of [`Rules`](Self::Rules) pairing a selector with actions. Rule order is
/// insertion order.
///
/// # Example
///
/// ```
/// use sel_apply::{Directive, Flow, Rule};
/// use sel_dom::Selector;
///
/// let directive = Directive::new()
///     .with_rule(Rule::new(Selector::parse("li")?).run(|el, index| {
///         el.set_attr("data-index", index.to_string());
///         Ok(Flow::Continue)
///     }))
///     .with_rule(Rule::new(Selector::parse(".stale")?).run(|el, _| {
///         el.add_class("archived");
///         Ok(Flow::Continue)
///     }));
/// # let _ = directive;
/// # Ok::<(), sel_dom::SelectorError>(())
/// ```
pub enum Directive {
    /// Directives applied in order, each against the same scope.
    Sequence(Vec<Directive>),
    /// Selector rules applied in insertion order.
    Rules(Vec<Rule>),
}

/// One selector with its ordered actions.
///
/// A rule built with a single [`run`](Self::run) or
/// [`descend`](Self::descend) call holds a one-action list; further calls
/// append, preserving order.
pub struct Rule {
    selector: Selector,
    actions: Vec<Action>,
}

/// One step executed per matched element.
pub enum Action {
    /// Invoke a handler with the element and its match index.
    Run(Box<dyn Handler>),
    /// Apply a nested directive with the element as the scope.
    Descend(Directive),
}

impl Directive {
    /// An empty rule list.
    #[must_use]
    pub fn new() -> Self {
        Self::Rules(Vec::new())
    }

    /// A sequence of directives applied in order against the same scope.
    #[must_use]
    pub fn sequence(items: impl IntoIterator<Item = Directive>) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    /// A rule list.
    #[must_use]
    pub fn rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self::Rules(rules.into_iter().collect())
    }

    /// Single-rule directive invoking `handler` for every `selector` match.
    pub fn on<F>(selector: Selector, handler: F) -> Self
    where
        F: FnMut(&mut Element, usize) -> Result<Flow, HandlerError> + Send + 'static,
    {
        Self::Rules(vec![Rule::new(selector).run(handler)])
    }

    /// Append a rule.
    ///
    /// On a [`Sequence`](Self::Sequence) the rule is appended as a
    /// single-rule directive, which applies identically.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        match &mut self {
            Self::Rules(rules) => rules.push(rule),
            Self::Sequence(items) => items.push(Self::Rules(vec![rule])),
        }
        self
    }
}

impl Default for Directive {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule {
    /// A rule for `selector` with no actions yet.
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            actions: Vec::new(),
        }
    }

    /// Append a closure handler action.
    #[must_use]
    pub fn run<F>(self, handler: F) -> Self
    where
        F: FnMut(&mut Element, usize) -> Result<Flow, HandlerError> + Send + 'static,
    {
        self.run_handler(handler)
    }

    /// Append a handler action.
    #[must_use]
    pub fn run_handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.actions.push(Action::Run(Box::new(handler)));
        self
    }

    /// Append a nested-directive action, scoped to each matched element.
    #[must_use]
    pub fn descend(mut self, nested: Directive) -> Self {
        self.actions.push(Action::Descend(nested));
        self
    }

    /// The rule's selector.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub(crate) fn actions_mut(&mut self) -> &mut [Action] {
        &mut self.actions
    }
}

impl fmt::Debug for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Self::Rules(rules) => f.debug_tuple("Rules").field(rules).finish(),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("selector", &self.selector.to_string())
            .field("actions", &self.actions)
            .finish()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run(_) => f.write_str("Run(..)"),
            Self::Descend(directive) => f.debug_tuple("Descend").field(directive).finish(),
        }
    }
}
