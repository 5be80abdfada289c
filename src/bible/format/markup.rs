//! A small owned XML tree.
//!
//! Book and dictionary files are parsed once into this tree with `quick_xml`,
//! queried while building indexes, and then dropped.

use std::borrow::Cow;
use std::slice;

use encoding_rs::UTF_8;
use log::{trace, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::bible::types::error::{BibleError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with its local name, attributes in source order, and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Compares the local name, ignoring ASCII case.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The first non-empty attribute among `names`, tried in order.
    pub fn first_attr(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .filter_map(|name| self.attr(name))
            .find(|value| !value.trim().is_empty())
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Every element below this one, in document order (self excluded).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// The first descendant named `name` whose `attr` equals `value`, or the
    /// first one named `name` when no attribute is given.
    pub fn find(&self, name: &str, attr: Option<(&str, &str)>) -> Option<&Element> {
        self.descendants().find(|element| {
            element.is(name) && attr.map_or(true, |(key, value)| element.attr(key) == Some(value))
        })
    }

    /// Concatenated text of this element and everything below it.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// Pre-order walk over the elements below a node.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Node::Element(element)) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                }
                Some(Node::Text(_)) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Decodes raw file bytes to text.
///
/// A byte-order mark selects UTF-8 or UTF-16; otherwise UTF-8 is assumed and
/// malformed sequences are replaced.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, encoding, had_errors) = UTF_8.decode(bytes);
    if had_errors {
        warn!("Malformed {} sequences replaced while decoding document", encoding.name());
    }
    text.into_owned()
}

/// Parses a document and returns its root element.
///
/// # Errors
/// Returns `BibleError::Xml` for malformed markup (including mismatched or
/// unclosed tags) and `BibleError::InvalidFormat` when there is no root element.
pub fn parse(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => open.push(start_element(&e)?),
            Event::Empty(e) => {
                let element = start_element(&e)?;
                attach(&mut open, &mut root, element);
            }
            Event::End(_) => {
                let element = open
                    .pop()
                    .ok_or_else(|| BibleError::Xml("Unexpected closing tag".to_string()))?;
                attach(&mut open, &mut root, element);
            }
            Event::Text(e) => {
                if let Some(parent) = open.last_mut() {
                    let text = e
                        .unescape()
                        .map(Cow::into_owned)
                        .unwrap_or_else(|_| String::from_utf8_lossy(&e).into_owned());
                    parent.children.push(Node::Text(text));
                }
            }
            Event::CData(e) => {
                if let Some(parent) = open.last_mut() {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    parent.children.push(Node::Text(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(unclosed) = open.last() {
        return Err(BibleError::Xml(format!("Unclosed element <{}>", unclosed.name)));
    }
    root.ok_or_else(|| BibleError::InvalidFormat("No root element found".to_string()))
}

fn start_element(e: &BytesStart) -> Result<Element> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let attributes = e
        .attributes()
        .map(|attr_result| {
            let attr = attr_result
                .map_err(|e| BibleError::Xml(format!("Failed to parse XML attribute: {}", e)))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map(Cow::into_owned)
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            Ok((key, value))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => trace!("Ignoring extra top-level element <{}>", element.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_tree_with_text_and_attributes() {
        let root = parse(r#"<?xml version="1.0"?><osis><w lemma="b/7225" morph="HR/Ncfsa">בְּ/רֵאשִׁ֖ית</w><seg>&amp;</seg><x/></osis>"#)
            .expect("parse");
        assert!(root.is("OSIS"));
        let words: Vec<_> = root.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(words, ["w", "seg", "x"]);
        let w = root.find("w", None).expect("w");
        assert_eq!(w.attr("lemma"), Some("b/7225"));
        assert_eq!(w.text(), "בְּ/רֵאשִׁ֖ית");
        assert_eq!(root.find("seg", None).map(Element::text).as_deref(), Some("&"));
    }

    #[test]
    fn descendants_are_in_document_order() {
        let root = parse("<a><b><c/></b><d/></a>").expect("parse");
        let names: Vec<_> = root.descendants().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "d"]);
    }

    #[test]
    fn first_attr_skips_missing_and_blank_values() {
        let root = parse(r#"<r><e id="" n="7"/></r>"#).expect("parse");
        let e = root.find("e", None).expect("e");
        assert_eq!(e.first_attr(&["osisID", "id", "n"]), Some("7"));
    }

    #[test]
    fn malformed_markup_is_an_error() {
        assert!(matches!(parse("<a><b></a>"), Err(BibleError::Xml(_))));
        assert!(matches!(parse("<a><b>"), Err(BibleError::Xml(_))));
        assert!(matches!(parse("just text"), Err(BibleError::InvalidFormat(_))));
    }

    #[test]
    fn decodes_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<a/>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&bytes), "<a/>");
        assert_eq!(decode_text("\u{FEFF}<a/>".as_bytes()), "<a/>");
    }
}
