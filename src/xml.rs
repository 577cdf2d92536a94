//! A small owned XML element tree built on top of the quick-xml event reader.
//!
//! Reports are loaded whole, so the tree keeps every element with its
//! namespace-stripped tag, attributes and direct text content.

use crate::errors::ReportError;
use crate::residues::FieldLookup;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One element of a parsed XML document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name without namespace prefix, original case
    pub tag: String,
    /// Attributes in document order, keys without namespace prefix
    pub attributes: Vec<(String, String)>,
    /// Concatenated, trimmed text content directly inside this element
    pub text: String,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Lowercased tag name.
    pub fn local_name(&self) -> String {
        self.tag.to_lowercase()
    }

    /// Value of the attribute `key`, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed text content, `None` when empty.
    pub fn text(&self) -> Option<&str> {
        let text = self.text.trim();
        (!text.is_empty()).then_some(text)
    }

    /// Iterate over this element and all of its descendants in document order.
    pub fn iter(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    fn from_start<B>(start: &BytesStart, reader: &Reader<B>) -> Result<Self, ReportError> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = reader.decoder().decode(attr.key.local_name().as_ref())?.into_owned();
            let value = attr.decode_and_unescape_value(reader)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            tag: reader.decoder().decode(start.local_name().as_ref())?.into_owned(),
            attributes,
            ..Default::default()
        })
    }
}

impl FieldLookup for XmlElement {
    fn field(&self, key: &str) -> Option<String> {
        self.attr(key).filter(|v| !v.is_empty()).map(str::to_owned)
    }
}

/// Pre-order iterator over an element subtree, see [`XmlElement::iter`].
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let elem = self.stack.pop()?;
        self.stack.extend(elem.children.iter().rev());
        Some(elem)
    }
}

/// Parse an XML document into its root element.
///
/// The document encoding is taken from its declaration (or BOM) and defaults
/// to UTF-8. Mismatched or unclosed tags, a missing root element and multiple
/// root elements are errors.
pub fn parse_xml<T: AsRef<[u8]> + ?Sized>(content: &T) -> Result<XmlElement, ReportError> {
    let mut reader = Reader::from_reader(content.as_ref());
    reader.trim_text(true);

    let mut open: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    loop {
        match reader.read_event()? {
            Event::Start(ref e) => open.push(XmlElement::from_start(e, &reader)?),
            Event::Empty(ref e) => {
                let elem = XmlElement::from_start(e, &reader)?;
                attach(&mut open, &mut root, elem)?
            }
            Event::End(_) => {
                let elem = open
                    .pop()
                    .ok_or_else(|| ReportError::MalformedXml("unexpected closing tag".into()))?;
                attach(&mut open, &mut root, elem)?;
            }
            Event::Text(ref t) => {
                if let Some(elem) = open.last_mut() {
                    elem.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(t) => {
                if let Some(elem) = open.last_mut() {
                    elem.text.push_str(&reader.decoder().decode(&t.into_inner())?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(elem) = open.last() {
        return Err(ReportError::MalformedXml(format!(
            "element <{}> is never closed",
            elem.tag
        )));
    }
    root.ok_or_else(|| ReportError::MalformedXml("no root element".into()))
}

/// Hand a completed element to its parent, or make it the document root.
fn attach(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    elem: XmlElement,
) -> Result<(), ReportError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(elem),
        None if root.is_none() => *root = Some(elem),
        None => {
            return Err(ReportError::MalformedXml(format!(
                "second root element <{}>",
                elem.tag
            )))
        }
    }
    Ok(())
}
