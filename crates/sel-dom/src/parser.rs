//! Markup parser building the element tree.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::element::Element;
use crate::error::DomError;

/// Tag of the synthetic root wrapping parsed fragments.
pub(crate) const ROOT_TAG: &str = "root";

/// Parse a markup fragment into a synthetic root element.
///
/// The input is wrapped in a `<root>` element so fragments with multiple
/// top-level elements (or none) parse uniformly.
pub(crate) fn parse_fragment(markup: &str) -> Result<Element, DomError> {
    let wrapped = format!("<{ROOT_TAG}>{markup}</{ROOT_TAG}>");
    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = decode_name(&reader, e.name().as_ref())?;
                let attrs = decode_attrs(&reader, &e)?;
                let mut root = parse_children(&mut reader, &tag)?;
                root.tag = tag;
                root.attrs = attrs;
                return Ok(root);
            }
            Event::Eof => return Ok(Element::new(ROOT_TAG)),
            // Nothing before the synthetic root is tree content.
            _ => {}
        }
    }
}

/// Parse the content of an element until its end tag.
fn parse_children(reader: &mut Reader<&[u8]>, parent_tag: &str) -> Result<Element, DomError> {
    let mut node = Element::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = decode_name(reader, e.name().as_ref())?;
                let attrs = decode_attrs(reader, &e)?;
                let mut child = parse_children(reader, &tag)?;
                child.tag = tag;
                child.attrs = attrs;
                node.children.push(child);
            }
            Event::Empty(e) => {
                let child = Element {
                    tag: decode_name(reader, e.name().as_ref())?,
                    attrs: decode_attrs(reader, &e)?,
                    ..Default::default()
                };
                node.children.push(child);
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?.into_owned();
                append_text(&mut node, &text);
            }
            Event::GeneralRef(e) => {
                let name = reader.decoder().decode(&e)?.into_owned();
                append_text(&mut node, &decode_entity(&name));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                append_text(&mut node, &text);
            }
            Event::End(e) => {
                let end_tag = decode_name(reader, e.name().as_ref())?;
                if end_tag == parent_tag {
                    return Ok(node);
                }
            }
            Event::Eof => return Ok(node),
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }
}

fn decode_name(reader: &Reader<&[u8]>, name: &[u8]) -> Result<String, DomError> {
    Ok(reader.decoder().decode(name)?.into_owned())
}

fn decode_attrs(
    reader: &Reader<&[u8]>,
    start: &BytesStart,
) -> Result<HashMap<String, String>, DomError> {
    let mut attrs = HashMap::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        attrs.insert(key, value);
    }
    Ok(attrs)
}

/// Append text to the node's text or to the last child's tail.
fn append_text(node: &mut Element, text: &str) {
    if let Some(last_child) = node.children.last_mut() {
        last_child.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

/// Decode an entity reference to its character value.
///
/// Unknown named entities are preserved verbatim.
fn decode_entity(name: &str) -> String {
    let decoded = match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        "nbsp" => Some('\u{00a0}'),
        n if n.starts_with('#') => parse_char_ref(n),
        _ => None,
    };
    decoded.map_or_else(|| format!("&{name};"), |c| c.to_string())
}

fn parse_char_ref(name: &str) -> Option<char> {
    let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        name.strip_prefix('#')?.parse().ok()?
    };
    char::from_u32(code)
}
