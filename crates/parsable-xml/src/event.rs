// Dweve Parsable - Format-agnostic file parsing
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! XML events and the sources that produce them.
//!
//! The reducer pulls [`XmlEvent`]s one at a time from an [`EventSource`] and
//! never looks back, so any producer that can deliver the document in order
//! can drive it. [`QuickXmlSource`] is the file-backed producer.

use parsable_core::ParseError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::VecDeque;
use std::fmt;
use std::io::BufRead;

/// One step of an XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// An opening tag. A self-closing element has `empty` set and is not
    /// followed by an [`XmlEvent::End`].
    Start {
        /// Qualified element name.
        name: String,
        /// Attributes in document order.
        attributes: Vec<(String, String)>,
        /// True for `<name/>`.
        empty: bool,
    },
    /// A closing tag.
    End {
        /// Qualified element name.
        name: String,
    },
    /// Unescaped character data.
    Text(String),
    /// The content of a CDATA section.
    CData(String),
    /// Comments, processing instructions, declarations and doctypes.
    Other,
}

impl XmlEvent {
    /// Shorthand for a non-empty start tag without attributes.
    pub fn start(name: impl Into<String>) -> Self {
        Self::Start {
            name: name.into(),
            attributes: Vec::new(),
            empty: false,
        }
    }

    /// Shorthand for a self-closing tag without attributes.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::Start {
            name: name.into(),
            attributes: Vec::new(),
            empty: true,
        }
    }

    /// Shorthand for a closing tag.
    pub fn end(name: impl Into<String>) -> Self {
        Self::End { name: name.into() }
    }

    /// Shorthand for a text event.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// A forward-only producer of [`XmlEvent`]s.
///
/// `Ok(None)` marks the end of the document.
pub trait EventSource {
    /// Pull the next event.
    fn next_event(&mut self) -> Result<Option<XmlEvent>, ParseError>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> Result<Option<XmlEvent>, ParseError> {
        (**self).next_event()
    }
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn next_event(&mut self) -> Result<Option<XmlEvent>, ParseError> {
        (**self).next_event()
    }
}

impl EventSource for VecDeque<XmlEvent> {
    fn next_event(&mut self) -> Result<Option<XmlEvent>, ParseError> {
        Ok(self.pop_front())
    }
}

/// Event source backed by `quick-xml`.
///
/// Whitespace-only text between elements is dropped, entities in text and
/// attribute values are unescaped, and mismatched end tags are reported as
/// [`ParseError::Xml`], as is a document ending inside an open element.
pub struct QuickXmlSource<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    open: Vec<String>,
    finished: bool,
}

impl<R: BufRead> QuickXmlSource<R> {
    /// Wrap a buffered reader.
    pub fn new(inner: R) -> Self {
        let mut reader = Reader::from_reader(inner);
        reader.trim_text(false);
        reader.check_end_names(true);
        Self {
            reader,
            buf: Vec::with_capacity(8192),
            open: Vec::new(),
            finished: false,
        }
    }

    /// Byte offset of the reader in the input.
    pub fn position(&self) -> usize {
        self.reader.buffer_position()
    }
}

impl<'a> QuickXmlSource<&'a [u8]> {
    /// Read events from an in-memory document.
    pub fn from_text(xml: &'a str) -> Self {
        Self::new(xml.as_bytes())
    }
}

impl<R: BufRead> EventSource for QuickXmlSource<R> {
    fn next_event(&mut self) -> Result<Option<XmlEvent>, ParseError> {
        if self.finished {
            return Ok(None);
        }
        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => {
                    self.finished = true;
                    return Err(xml_error(self.reader.buffer_position(), e));
                }
            };
            let position = self.reader.buffer_position();
            let converted = match event {
                Event::Start(e) => {
                    let event = start_event(&e, false, position)?;
                    if let XmlEvent::Start { name, .. } = &event {
                        self.open.push(name.clone());
                    }
                    event
                }
                Event::Empty(e) => start_event(&e, true, position)?,
                Event::End(e) => {
                    self.open.pop();
                    XmlEvent::End {
                        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    }
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|e| xml_error(position, e))?;
                    if text.trim().is_empty() {
                        continue;
                    }
                    XmlEvent::Text(text.into_owned())
                }
                Event::CData(e) => {
                    XmlEvent::CData(String::from_utf8_lossy(&e.into_inner()).into_owned())
                }
                Event::Eof => {
                    self.finished = true;
                    if let Some(name) = self.open.last() {
                        return Err(xml_error(
                            position,
                            format!("unexpected end of document, <{}> is not closed", name),
                        ));
                    }
                    return Ok(None);
                }
                _ => XmlEvent::Other,
            };
            return Ok(Some(converted));
        }
    }
}

impl<R: BufRead> fmt::Debug for QuickXmlSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickXmlSource")
            .field("position", &self.reader.buffer_position())
            .field("open", &self.open)
            .field("finished", &self.finished)
            .finish()
    }
}

fn start_event(e: &BytesStart<'_>, empty: bool, position: usize) -> Result<XmlEvent, ParseError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| xml_error(position, e))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| xml_error(position, e))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(XmlEvent::Start {
        name,
        attributes,
        empty,
    })
}

fn xml_error(position: usize, err: impl fmt::Display) -> ParseError {
    ParseError::Xml {
        position,
        message: err.to_string(),
    }
}
