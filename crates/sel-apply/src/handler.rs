//! Handler trait and control flow for matched elements.

use sel_dom::Element;

use crate::directive::Directive;

/// Error returned by a handler.
///
/// Handler errors are caller-defined; the applier propagates them
/// unmodified, adding no context and attempting no retry.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What to do after a handler ran on a matched element.
pub enum Flow {
    /// Move on to the next action or match.
    Continue,
    /// Apply the given directive with the matched element as the scope.
    Descend(Directive),
}

impl std::fmt::Debug for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continue => f.write_str("Continue"),
            Self::Descend(directive) => f.debug_tuple("Descend").field(directive).finish(),
        }
    }
}

/// Callback invoked once per matched element.
///
/// `index` is the element's zero-based position within the match set of
/// its rule. Handlers may mutate the element freely; returning
/// [`Flow::Descend`] applies a further directive scoped to this element.
///
/// Any `FnMut(&mut Element, usize) -> Result<Flow, HandlerError>` closure
/// is a handler. Implement the trait directly for stateful handlers:
///
/// ```
/// use sel_apply::{Flow, Handler, HandlerError};
/// use sel_dom::Element;
///
/// struct Counter(usize);
///
/// impl Handler for Counter {
///     fn on_match(&mut self, _el: &mut Element, _index: usize) -> Result<Flow, HandlerError> {
///         self.0 += 1;
///         Ok(Flow::Continue)
///     }
/// }
/// ```
///
/// # Thread Safety
///
/// Handlers are `Send` only (not `Sync`): a directive is applied by one
/// thread at a time, but may be built on one thread and applied on another.
pub trait Handler: Send {
    /// Process one matched element.
    fn on_match(&mut self, element: &mut Element, index: usize) -> Result<Flow, HandlerError>;
}

impl<F> Handler for F
where
    F: FnMut(&mut Element, usize) -> Result<Flow, HandlerError> + Send,
{
    fn on_match(&mut self, element: &mut Element, index: usize) -> Result<Flow, HandlerError> {
        self(element, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tagger;

    impl Handler for Tagger {
        fn on_match(&mut self, element: &mut Element, index: usize) -> Result<Flow, HandlerError> {
            element.set_attr("data-index", index.to_string());
            Ok(Flow::Continue)
        }
    }

    #[test]
    fn test_trait_handler() {
        let mut el = Element::new("p");
        Tagger.on_match(&mut el, 3).unwrap();
        assert_eq!(el.attr("data-index"), Some("3"));
    }

    #[test]
    fn test_closure_handler() {
        let mut seen = Vec::new();
        let mut handler = |element: &mut Element, index: usize| {
            seen.push((element.tag.clone(), index));
            Ok(Flow::Continue)
        };
        let mut el = Element::new("li");
        handler.on_match(&mut el, 0).unwrap();
        drop(handler);
        assert_eq!(seen, vec![("li".to_owned(), 0)]);
    }

    #[test]
    fn test_handler_error() {
        let mut handler =
            |_: &mut Element, _: usize| -> Result<Flow, HandlerError> { Err("boom".into()) };
        let mut el = Element::new("p");
        let err = handler.on_match(&mut el, 0).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
