//! Mutable HTML element tree with CSS selector queries.
//!
//! This crate is the DOM substrate for `sel-apply`: a mutable [`Element`]
//! tree parsed from XHTML-style markup, a CSS selector subset
//! ([`Selector`]), and document-order descendant queries returning
//! [`NodePath`]s that stay meaningful while the tree is being mutated.
//!
//! Markup must be well-formed in the XML sense: every element closed,
//! void elements written self-closing (`<br />`).
//!
//! # Example
//!
//! ```
//! use sel_dom::{Document, Selector};
//!
//! let mut doc = Document::parse(r#"<div class="note"><p>first</p><p>second</p></div>"#)?;
//! let selector = Selector::parse("div.note > p")?;
//!
//! let matches = doc.select(&selector);
//! assert_eq!(matches.len(), 2);
//!
//! if let Some(p) = doc.node_mut(&matches[0]) {
//!     p.set_attr("data-first", "true");
//! }
//! assert!(doc.to_html().contains(r#"data-first="true""#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod document;
mod element;
mod error;
mod parser;
mod query;
mod selector;
mod serializer;

pub use document::Document;
pub use element::{Element, NodePath};
pub use error::{DomError, SelectorError};
pub use selector::Selector;
