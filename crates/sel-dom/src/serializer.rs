//! Markup serialization of element trees.

use std::fmt::Write;

use crate::element::Element;

/// Write an element and its subtree, excluding the element's own tail.
///
/// Attributes are emitted in sorted key order so output is deterministic.
pub(crate) fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);

    let mut attrs: Vec<_> = el.attrs.iter().collect();
    attrs.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in attrs {
        // Writing to a String cannot fail.
        write!(out, r#" {key}="{}""#, escape_attr(value)).unwrap();
    }

    if el.children.is_empty() && el.text.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    out.push_str(&escape_text(&el.text));
    for child in &el.children {
        write_node(child, out);
    }
    write!(out, "</{}>", el.tag).unwrap();
}

/// Write an element, its subtree, and its tail.
pub(crate) fn write_node(el: &Element, out: &mut String) {
    write_element(el, out);
    out.push_str(&escape_text(&el.tail));
}

fn escape_text(text: &str) -> String {
    escape(text, false)
}

fn escape_attr(text: &str) -> String {
    escape(text, true)
}

fn escape(text: &str, quotes: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            '\'' if quotes => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_write_simple_element() {
        let el = Element::new("p").with_text("Hello");
        assert_eq!(el.to_markup(), "<p>Hello</p>");
    }

    #[test]
    fn test_write_nested_with_tail() {
        let strong = Element::new("strong").with_text("Bold").with_tail(" text");
        let p = Element::new("p").with_children(vec![strong]);
        assert_eq!(p.to_markup(), "<p><strong>Bold</strong> text</p>");
    }

    #[test]
    fn test_write_self_closing() {
        let br = Element::new("br").with_tail("After");
        let p = Element::new("p").with_text("Before").with_children(vec![br]);
        assert_eq!(p.to_markup(), "<p>Before<br />After</p>");
    }

    #[test]
    fn test_write_attributes_sorted() {
        let el = Element::new("a")
            .with_attr("href", "/docs")
            .with_attr("class", "link")
            .with_text("Docs");
        assert_eq!(el.to_markup(), r#"<a class="link" href="/docs">Docs</a>"#);
    }

    #[test]
    fn test_escape_text() {
        let el = Element::new("p").with_text("a < b & c > d");
        assert_eq!(el.to_markup(), "<p>a &lt; b &amp; c &gt; d</p>");
    }

    #[test]
    fn test_escape_attr_quotes() {
        let el = Element::new("p").with_attr("title", r#"say "hi""#).with_text("x");
        assert_eq!(el.to_markup(), r#"<p title="say &quot;hi&quot;">x</p>"#);
    }

    #[test]
    fn test_own_tail_excluded() {
        let el = Element::new("span").with_text("body").with_tail(" tail");
        assert_eq!(el.to_markup(), "<span>body</span>");
    }
}
