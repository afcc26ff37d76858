//! CSS selector subset: parsing and element matching.
//!
//! Supported grammar:
//!
//! ```text
//! list     := complex ("," complex)*
//! complex  := compound ((" " | ">") compound)*
//! compound := [tag | "*"] ("#" name)* ("." name)*
//! ```
//!
//! Tag names match ASCII case-insensitively; ids and classes match exactly.
//! Combinators are resolved within the queried subtree only: an ancestor
//! above the scope root never participates in a match.

use std::fmt;

use crate::element::Element;
use crate::error::SelectorError;

/// Parsed selector list.
///
/// Parsing is the fail-fast boundary for selector syntax: a [`Selector`]
/// value is always well-formed, so tree walks never report syntax errors.
///
/// # Example
///
/// ```
/// use sel_dom::Selector;
///
/// let selector = Selector::parse("div.note > p, #intro")?;
/// assert_eq!(selector.to_string(), "div.note > p, #intro");
///
/// assert!(Selector::parse("div >").is_err());
/// # Ok::<(), sel_dom::SelectorError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    parts: Vec<ComplexSelector>,
}

/// One comma-list entry: compounds joined by combinators.
///
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ComplexSelector {
    compounds: Vec<Compound>,
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    /// Whitespace: any ancestor.
    Descendant,
    /// `>`: immediate parent.
    Child,
}

/// Constraints an element must satisfy: tag, ids, classes.
///
/// An empty compound (from `*`) matches every element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] describing the first syntax problem.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let source = input.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut parts = Vec::new();
        for entry in source.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                return Err(SelectorError::EmptyListEntry {
                    selector: source.to_owned(),
                });
            }
            parts.push(parse_complex(entry, source)?);
        }

        Ok(Self {
            source: source.to_owned(),
            parts,
        })
    }

    /// Whether `element` matches, given its ancestor chain.
    ///
    /// `ancestors` runs from the scope root down to the element's parent,
    /// both inclusive.
    pub(crate) fn matches(&self, element: &Element, ancestors: &[&Element]) -> bool {
        self.parts
            .iter()
            .any(|part| part.matches(element, ancestors))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl ComplexSelector {
    fn matches(&self, element: &Element, ancestors: &[&Element]) -> bool {
        let last = self.compounds.len() - 1;
        self.compounds[last].matches(element) && self.matches_upward(last, ancestors)
    }

    /// Match the compounds left of `index` against the ancestor chain,
    /// backtracking over descendant combinators.
    fn matches_upward(&self, index: usize, ancestors: &[&Element]) -> bool {
        if index == 0 {
            return true;
        }
        let compound = &self.compounds[index - 1];
        match self.combinators[index - 1] {
            Combinator::Child => {
                let Some((parent, rest)) = ancestors.split_last() else {
                    return false;
                };
                compound.matches(parent) && self.matches_upward(index - 1, rest)
            }
            Combinator::Descendant => (0..ancestors.len()).rev().any(|i| {
                compound.matches(ancestors[i]) && self.matches_upward(index - 1, &ancestors[..i])
            }),
        }
    }
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(&element.tag) {
                return false;
            }
        }
        if !self.ids.iter().all(|id| element.id() == Some(id.as_str())) {
            return false;
        }
        self.classes.iter().all(|class| element.has_class(class))
    }
}

fn parse_complex(entry: &str, source: &str) -> Result<ComplexSelector, SelectorError> {
    let mut compounds = Vec::new();
    let mut combinators = Vec::new();
    let mut rest = entry;

    loop {
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '>')
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(end);
        compounds.push(parse_compound(head, source)?);

        let tail = tail.trim_start();
        if tail.is_empty() {
            break;
        }
        if let Some(after) = tail.strip_prefix('>') {
            let after = after.trim_start();
            if after.is_empty() {
                return Err(SelectorError::DanglingCombinator {
                    selector: source.to_owned(),
                });
            }
            combinators.push(Combinator::Child);
            rest = after;
        } else {
            combinators.push(Combinator::Descendant);
            rest = tail;
        }
    }

    Ok(ComplexSelector {
        compounds,
        combinators,
    })
}

fn parse_compound(input: &str, source: &str) -> Result<Compound, SelectorError> {
    if input.is_empty() {
        return Err(SelectorError::EmptyCompound {
            selector: source.to_owned(),
        });
    }

    let mut compound = Compound::default();
    let mut rest = input;

    if let Some(after) = rest.strip_prefix('*') {
        rest = after;
    } else if rest.starts_with(is_name_char) {
        let end = rest.find(|c| !is_name_char(c)).unwrap_or(rest.len());
        compound.tag = Some(rest[..end].to_owned());
        rest = &rest[end..];
    }

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('#') {
            let (name, after) = take_name(after, source)?;
            compound.ids.push(name);
            rest = after;
        } else if let Some(after) = rest.strip_prefix('.') {
            let (name, after) = take_name(after, source)?;
            compound.classes.push(name);
            rest = after;
        } else {
            let Some(token) = rest.chars().next() else {
                break;
            };
            return Err(SelectorError::UnexpectedToken {
                token,
                selector: source.to_owned(),
            });
        }
    }

    Ok(compound)
}

fn take_name<'a>(input: &'a str, source: &str) -> Result<(String, &'a str), SelectorError> {
    let end = input.find(|c| !is_name_char(c)).unwrap_or(input.len());
    if end == 0 {
        return Err(SelectorError::EmptyName {
            selector: source.to_owned(),
        });
    }
    Ok((input[..end].to_owned(), &input[end..]))
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sel(s: &str) -> Selector {
        Selector::parse(s).expect("valid selector")
    }

    #[test]
    fn test_parse_tag() {
        let s = sel("p");
        assert_eq!(s.parts.len(), 1);
        assert_eq!(s.parts[0].compounds[0].tag.as_deref(), Some("p"));
    }

    #[test]
    fn test_parse_compound() {
        let s = sel("div#main.note.wide");
        let compound = &s.parts[0].compounds[0];
        assert_eq!(compound.tag.as_deref(), Some("div"));
        assert_eq!(compound.ids, vec!["main"]);
        assert_eq!(compound.classes, vec!["note", "wide"]);
    }

    #[test]
    fn test_parse_universal() {
        let s = sel("*");
        assert_eq!(s.parts[0].compounds[0], Compound::default());
    }

    #[test]
    fn test_parse_combinators() {
        let s = sel("div p > span");
        let part = &s.parts[0];
        assert_eq!(part.compounds.len(), 3);
        assert_eq!(
            part.combinators,
            vec![Combinator::Descendant, Combinator::Child]
        );
    }

    #[test]
    fn test_parse_list() {
        let s = sel("h1, h2 , .note");
        assert_eq!(s.parts.len(), 3);
    }

    #[test]
    fn test_display_preserves_source() {
        assert_eq!(sel("  div.note > p ").to_string(), "div.note > p");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert!(matches!(
            Selector::parse("a,,b"),
            Err(SelectorError::EmptyListEntry { .. })
        ));
        assert!(matches!(
            Selector::parse("div >"),
            Err(SelectorError::DanglingCombinator { .. })
        ));
        assert!(matches!(
            Selector::parse("> div"),
            Err(SelectorError::EmptyCompound { .. })
        ));
        assert!(matches!(
            Selector::parse("div."),
            Err(SelectorError::EmptyName { .. })
        ));
        assert!(matches!(
            Selector::parse("p[href]"),
            Err(SelectorError::UnexpectedToken { token: '[', .. })
        ));
        assert!(matches!(
            Selector::parse("a >> b"),
            Err(SelectorError::EmptyCompound { .. })
        ));
    }

    #[test]
    fn test_match_tag_case_insensitive() {
        let el = Element::new("DIV");
        assert!(sel("div").matches(&el, &[]));
    }

    #[test]
    fn test_match_id_and_class() {
        let el = Element::new("p")
            .with_attr("id", "intro")
            .with_attr("class", "note wide");
        assert!(sel("#intro").matches(&el, &[]));
        assert!(sel(".note.wide").matches(&el, &[]));
        assert!(sel("p#intro.note").matches(&el, &[]));
        assert!(!sel("#outro").matches(&el, &[]));
        assert!(!sel(".narrow").matches(&el, &[]));
    }

    #[test]
    fn test_match_universal() {
        assert!(sel("*").matches(&Element::new("anything"), &[]));
    }

    #[test]
    fn test_match_list_any_entry() {
        let el = Element::new("h2");
        assert!(sel("h1, h2").matches(&el, &[]));
        assert!(!sel("h1, h3").matches(&el, &[]));
    }

    #[test]
    fn test_match_child_combinator() {
        let parent = Element::new("ul").with_attr("class", "menu");
        let grandparent = Element::new("nav");
        let el = Element::new("li");

        assert!(sel("ul.menu > li").matches(&el, &[&grandparent, &parent]));
        assert!(!sel("nav > li").matches(&el, &[&grandparent, &parent]));
    }

    #[test]
    fn test_match_descendant_combinator() {
        let outer = Element::new("article");
        let inner = Element::new("div");
        let el = Element::new("p");

        assert!(sel("article p").matches(&el, &[&outer, &inner]));
        assert!(sel("article div p").matches(&el, &[&outer, &inner]));
        assert!(!sel("section p").matches(&el, &[&outer, &inner]));
    }

    #[test]
    fn test_match_descendant_backtracking() {
        // `div > p` must not match when only the farther div is the parent's
        // parent; `div p` must.
        let far = Element::new("div");
        let near = Element::new("span");
        let el = Element::new("p");

        assert!(sel("div p").matches(&el, &[&far, &near]));
        assert!(!sel("div > p").matches(&el, &[&far, &near]));
    }

    #[test]
    fn test_match_mixed_combinators() {
        // `a b > c`: c's parent is b, and some ancestor above b is a.
        let a = Element::new("a");
        let x = Element::new("x");
        let b = Element::new("b");
        let el = Element::new("c");

        assert!(sel("a b > c").matches(&el, &[&a, &x, &b]));
        assert!(!sel("a b > c").matches(&el, &[&x, &b, &a]));
    }

    #[test]
    fn test_no_ancestors_no_combinator_match() {
        let el = Element::new("p");
        assert!(!sel("div p").matches(&el, &[]));
        assert!(!sel("div > p").matches(&el, &[]));
    }
}
