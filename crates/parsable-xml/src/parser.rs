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

//! The XML implementation of [`ParsableFile`].

use crate::config::XmlConfig;
use crate::event::{EventSource, QuickXmlSource};
use crate::reduce::reduce;
use parsable_core::{
    open_file, sniff_encoding, Capability, Node, OpenError, Options, ParsableFile, ParseResult,
    ParserState,
};
use std::path::Path;
use tracing::debug;

/// Hierarchical parser for XML files.
///
/// # Examples
///
/// ```rust,no_run
/// use parsable_core::{Options, ParsableFile};
/// use parsable_xml::XmlFileParser;
///
/// let mut parser = XmlFileParser::open_path("news.xml", &Options::new().path("rss.channel.item"))?;
/// for (_, item) in parser.cursor()? {
///     println!("{:?}", item.get("title"));
/// }
/// parser.close();
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct XmlFileParser {
    state: ParserState<Box<dyn EventSource>>,
    config: XmlConfig,
}

impl XmlFileParser {
    /// A parser with nothing open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser and open `path` right away.
    pub fn open_path(path: impl AsRef<Path>, options: &Options) -> Result<Self, OpenError> {
        let mut parser = Self::new();
        parser.open(path.as_ref(), options)?;
        Ok(parser)
    }

    /// Create an open parser reading from any event source.
    ///
    /// The encoding is whatever `options.encoding` declares.
    pub fn from_source<S>(source: S, options: &Options) -> Self
    where
        S: EventSource + 'static,
    {
        let config = XmlConfig::default().resolve(options);
        let mut state = ParserState::new();
        state.open(Box::new(source) as Box<dyn EventSource>, config.encoding.clone());
        Self { state, config }
    }

    /// Configuration resolved at open time.
    pub fn config(&self) -> &XmlConfig {
        &self.config
    }
}

impl ParsableFile for XmlFileParser {
    fn capability(&self) -> Capability {
        Capability::Hierarchical
    }

    fn open(&mut self, path: &Path, options: &Options) -> Result<(), OpenError> {
        let reader = open_file(path)?;
        let encoding = sniff_encoding(path);
        self.config = XmlConfig::with_encoding(encoding.clone()).resolve(options);
        debug!(
            path = %path.display(),
            encoding = ?encoding,
            config = ?self.config,
            "opened XML file"
        );
        self.state
            .open(Box::new(QuickXmlSource::new(reader)), encoding);
        Ok(())
    }

    fn parse(&mut self) -> ParseResult<&Node> {
        let config = &self.config;
        self.state
            .parse_with(|source| reduce(source.as_mut(), config))
    }

    fn encoding(&self) -> Option<&str> {
        self.state.encoding()
    }

    fn close(&mut self) {
        self.state.close();
    }

    fn is_open(&self) -> bool {
        self.state.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::XmlEvent;
    use parsable_core::{ParseError, PreconditionError};
    use std::collections::VecDeque;
    use std::io::Write;

    fn write_xml(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".xml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_before_open() {
        let mut parser = XmlFileParser::new();
        let err = parser.parse().unwrap_err();
        assert!(matches!(
            err,
            ParseError::Precondition(PreconditionError::NotOpen)
        ));
        assert_eq!(parser.encoding(), None);
    }

    #[test]
    fn test_open_parse_close() {
        let file = write_xml("<list><v>1</v><v>2</v></list>");
        let mut parser = XmlFileParser::open_path(file.path(), &Options::new().path("list.v")).unwrap();
        assert!(parser.is_open());
        assert_eq!(parser.encoding(), Some("us-ascii"));
        assert_eq!(parser.config().path, vec!["list", "v"]);

        let data = parser.data().unwrap().clone();
        assert_eq!(data, Node::Indexed(vec![Node::leaf("1"), Node::leaf("2")]));

        parser.close();
        assert!(!parser.is_open());
        assert_eq!(parser.encoding(), None);
        parser.close();
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut parser = XmlFileParser::new();
        let err = parser
            .open(&dir.path().join("missing.xml"), &Options::new())
            .unwrap_err();
        assert!(matches!(err, OpenError::NotFound { .. }));
        assert!(!parser.is_open());
    }

    #[test]
    fn test_from_source() {
        let events: VecDeque<XmlEvent> = vec![
            XmlEvent::start("a"),
            XmlEvent::text("x"),
            XmlEvent::end("a"),
        ]
        .into();
        let mut parser = XmlFileParser::from_source(events, &Options::new().encoding("utf-8"));
        assert_eq!(parser.encoding(), Some("utf-8"));
        let data = parser.parse().unwrap();
        assert_eq!(data.get("a"), Some(&Node::leaf("x")));
    }

    #[test]
    fn test_failed_parse_then_reopen() {
        let bad = write_xml("<a><b></a>");
        let mut parser = XmlFileParser::open_path(bad.path(), &Options::new()).unwrap();
        assert!(matches!(parser.parse(), Err(ParseError::Xml { .. })));
        assert!(matches!(
            parser.parse(),
            Err(ParseError::Precondition(PreconditionError::ParseFailed))
        ));
        // Encoding stays known until close.
        assert_eq!(parser.encoding(), Some("us-ascii"));

        let good = write_xml("<a>ok</a>");
        parser.open(good.path(), &Options::new()).unwrap();
        assert_eq!(parser.parse().unwrap().get("a"), Some(&Node::leaf("ok")));
    }

    #[test]
    fn test_capability() {
        assert_eq!(XmlFileParser::new().capability(), Capability::Hierarchical);
    }
}
