//! Error types for markup parsing and selector parsing.

/// Error while parsing markup into an element tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DomError {
    /// Markup is not well-formed XML.
    #[error("markup parse error")]
    Parse(#[from] quick_xml::Error),

    /// Malformed attribute syntax.
    #[error("malformed attribute")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error while decoding markup bytes.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}

/// Error while parsing a selector string.
///
/// Selector strings are configuration; a string this parser rejects is
/// surfaced when the selector is built, never during a tree walk.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SelectorError {
    /// The selector string was empty or all whitespace.
    #[error("empty selector")]
    Empty,

    /// A comma-separated selector list contained an empty entry.
    #[error("empty entry in selector list `{selector}`")]
    EmptyListEntry {
        /// The offending selector string.
        selector: String,
    },

    /// A combinator had no compound selector on one side.
    #[error("expected element before or after combinator in `{selector}`")]
    EmptyCompound {
        /// The offending selector string.
        selector: String,
    },

    /// A `>` combinator ended the selector.
    #[error("combinator with no right-hand side in `{selector}`")]
    DanglingCombinator {
        /// The offending selector string.
        selector: String,
    },

    /// `#` or `.` was not followed by a name.
    #[error("`#` or `.` with no name in `{selector}`")]
    EmptyName {
        /// The offending selector string.
        selector: String,
    },

    /// A character outside the supported selector grammar.
    #[error("unexpected `{token}` in selector `{selector}`")]
    UnexpectedToken {
        /// The unsupported character.
        token: char,
        /// The offending selector string.
        selector: String,
    },
}
