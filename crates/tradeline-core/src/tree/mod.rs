//! Build a loosely-typed tree from bureau XML.
//!
//! The shape matches what a generic XML-to-object converter produces when it
//! is not told to use explicit arrays:
//! - the document is `{ "<root>": <value> }`
//! - an element with no attributes and no child elements is its raw text
//! - otherwise it is an object of children keyed by tag, attributes under
//!   `"$"` and non-blank text under `"_"`
//! - a child that occurs once is a scalar, a repeated child is an array
//!
//! The normalizer never assumes which of those shapes it will see.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::error::TradelineError;

/// Key holding an element's attributes.
pub const ATTR_KEY: &str = "$";
/// Key holding an element's text when it also has attributes or children.
pub const TEXT_KEY: &str = "_";

#[derive(Debug)]
struct Frame {
    name: String,
    attrs: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, TradelineError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attrs = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| TradelineError::Xml(format!("bad attribute on <{name}>: {e}")))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| TradelineError::Xml(format!("bad attribute value on <{name}>: {e}")))?;
            attrs.insert(key, Value::String(value.into_owned()));
        }
        Ok(Frame {
            name,
            attrs,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        if self.attrs.is_empty() && self.children.is_empty() {
            return (self.name, Value::String(self.text));
        }
        let mut obj = self.children;
        if !self.attrs.is_empty() {
            obj.insert(ATTR_KEY.into(), Value::Object(self.attrs));
        }
        if !self.text.trim().is_empty() {
            obj.insert(TEXT_KEY.into(), Value::String(self.text));
        }
        (self.name, Value::Object(obj))
    }
}

/// Parse XML bytes into a tree. Fails only when the input is not well-formed
/// XML with exactly one root element.
pub fn parse_tree(xml: &[u8]) -> Result<Value, TradelineError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            TradelineError::Xml(format!(
                "at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let frame = Frame::open(&start)?;
                attach(&mut stack, &mut root, frame.close())?;
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| TradelineError::Xml("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, frame.close())?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| TradelineError::Xml(format!("bad text content: {e}")))?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata).into_owned();
                append_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry no report data.
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(TradelineError::Xml(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    let (name, value) = root.ok_or_else(|| TradelineError::Xml("no root element".into()))?;
    let mut doc = Map::new();
    doc.insert(name, value);
    Ok(Value::Object(doc))
}

fn append_text(stack: &mut [Frame], text: &str) -> Result<(), TradelineError> {
    match stack.last_mut() {
        Some(frame) => {
            frame.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(TradelineError::Xml("text outside the root element".into())),
    }
}

fn attach(
    stack: &mut [Frame],
    root: &mut Option<(String, Value)>,
    (name, value): (String, Value),
) -> Result<(), TradelineError> {
    match stack.last_mut() {
        Some(parent) => {
            push_child(&mut parent.children, name, value);
            Ok(())
        }
        None if root.is_some() => Err(TradelineError::Xml(format!(
            "more than one root element (second is <{name}>)"
        ))),
        None => {
            *root = Some((name, value));
            Ok(())
        }
    }
}

/// Element values are never arrays themselves, so an existing array means
/// the tag has already repeated.
fn push_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}
