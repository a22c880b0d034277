//! Markup parsing with `quick-xml`.
//!
//! The event stream is folded into the owned `XmlDocument` model. Comments,
//! processing instructions and the doctype are dropped; character data and
//! CDATA are kept in document order. Namespace prefixes are stripped from
//! element and attribute names.

use std::borrow::Cow;

use logdoc_core::{
    application::{ApplicationError, ports::MarkupParser},
    domain::{XmlDocument, XmlElement},
    error::LogdocResult,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::trace;

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

impl XmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl MarkupParser for XmlParser {
    fn parse(&self, name: &str, text: &str) -> LogdocResult<XmlDocument> {
        let root = TreeBuilder::new(name, text).build()?;
        trace!(document = name, root = root.name(), "Parsed markup");
        Ok(XmlDocument::new(name, root))
    }
}

struct TreeBuilder<'a> {
    name: &'a str,
    text: &'a str,
    reader: Reader<&'a [u8]>,
    open: Vec<XmlElement>,
    root: Option<XmlElement>,
}

impl<'a> TreeBuilder<'a> {
    fn new(name: &'a str, text: &'a str) -> Self {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(false);
        reader.config_mut().check_end_names = true;
        Self {
            name,
            text,
            reader,
            open: Vec::new(),
            root: None,
        }
    }

    fn build(mut self) -> Result<XmlElement, ApplicationError> {
        loop {
            let position = self.reader.buffer_position() as usize;
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    let at = self.reader.error_position() as usize;
                    return Err(self.error(at, &e.to_string()));
                }
            };

            match event {
                Event::Start(start) => {
                    let element = self.element(&start, position)?;
                    self.open.push(element);
                }
                Event::Empty(start) => {
                    let element = self.element(&start, position)?;
                    self.close(element, position)?;
                }
                Event::End(_) => match self.open.pop() {
                    Some(element) => self.close(element, position)?,
                    None => return Err(self.error(position, "unexpected closing tag")),
                },
                Event::Text(text) => {
                    let value = text
                        .unescape()
                        .map_err(|e| self.error(position, &e.to_string()))?;
                    self.push_text(value, position)?;
                }
                Event::CData(data) => {
                    let value = String::from_utf8_lossy(&data).into_owned();
                    self.push_text(Cow::Owned(value), position)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = self.open.last() {
            let message = format!("element <{}> is never closed", unclosed.name());
            return Err(self.error(self.text.len(), &message));
        }
        self.root
            .take()
            .ok_or_else(|| self.error(self.text.len(), "document has no root element"))
    }

    fn element(
        &self,
        start: &BytesStart<'_>,
        position: usize,
    ) -> Result<XmlElement, ApplicationError> {
        let mut element = XmlElement::new(String::from_utf8_lossy(start.local_name().as_ref()));
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| self.error(position, &e.to_string()))?;
            let key = attribute.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let value = attribute
                .unescape_value()
                .map_err(|e| self.error(position, &e.to_string()))?;
            element.set_attribute(
                String::from_utf8_lossy(attribute.key.local_name().as_ref()),
                value,
            );
        }
        Ok(element)
    }

    fn close(&mut self, element: XmlElement, position: usize) -> Result<(), ApplicationError> {
        match self.open.last_mut() {
            Some(parent) => parent.push_child(element),
            None if self.root.is_some() => {
                return Err(self.error(position, "more than one root element"));
            }
            None => self.root = Some(element),
        }
        Ok(())
    }

    fn push_text(&mut self, value: Cow<'_, str>, position: usize) -> Result<(), ApplicationError> {
        match self.open.last_mut() {
            Some(parent) => parent.push_text(value),
            None if value.trim().is_empty() => {}
            None => return Err(self.error(position, "text outside the root element")),
        }
        Ok(())
    }

    fn error(&self, offset: usize, reason: &str) -> ApplicationError {
        let (line, column) = line_and_column(self.text, offset);
        ApplicationError::Parse {
            document: self.name.to_string(),
            reason: format!("{reason} at {line}:{column}"),
        }
    }
}

/// 1-based line and column of a byte offset.
fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let prefix = &text.as_bytes()[..offset.min(text.len())];
    let line = prefix.iter().filter(|b| **b == b'\n').count() + 1;
    let column = prefix
        .iter()
        .rev()
        .take_while(|b| **b != b'\n')
        .count()
        + 1;
    (line, column)
}
