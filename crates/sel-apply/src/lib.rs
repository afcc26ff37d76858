//! Declarative selector-to-handler directives over an HTML tree.
//!
//! A [`Directive`] pairs CSS selectors with [`Handler`]s or nested
//! directives. [`apply`] walks a [`sel_dom::Document`] and invokes each
//! handler once per matching element, in document order, with the
//! element's zero-based index in its match set. A handler returning
//! [`Flow::Descend`] (and any nested directive) recurses with the matched
//! element as the new scope.
//!
//! Selectors that match nothing are skipped silently; handler errors
//! propagate out of [`apply`] unmodified.
//!
//! # Example
//!
//! ```
//! use sel_apply::{apply, Directive, Flow, Rule};
//! use sel_dom::{Document, Selector};
//!
//! let mut doc = Document::parse("<ul><li>one</li><li>two</li></ul>")?;
//!
//! let mut directive = Directive::new().with_rule(
//!     Rule::new(Selector::parse("ul > li")?).run(|el, index| {
//!         el.set_attr("data-index", index.to_string());
//!         Ok(Flow::Continue)
//!     }),
//! );
//!
//! apply(&mut directive, &mut doc)?;
//! assert_eq!(
//!     doc.to_html(),
//!     r#"<ul><li data-index="0">one</li><li data-index="1">two</li></ul>"#
//! );
//! # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
//! ```

mod apply;
mod directive;
mod handler;

pub use apply::{apply, apply_within};
pub use directive::{Action, Directive, Rule};
pub use handler::{Flow, Handler, HandlerError};
