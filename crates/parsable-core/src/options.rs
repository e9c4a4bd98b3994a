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

//! Caller-supplied parsing options.
//!
//! [`Options`] is the uniform override bag accepted by every parser's `open`.
//! Each format resolves it against its own defaults into an immutable config
//! (`CsvConfig`, `XmlConfig`), so options that do not apply to a format are
//! simply ignored by it.
//!
//! # Examples
//!
//! ```rust
//! use parsable_core::Options;
//!
//! let options = Options::new().headings(true).delimiter(b';');
//! assert_eq!(options.headings, Some(true));
//!
//! let options = Options::from_pairs([("path", "rss.channel.item"), ("complexParsing", "yes")])?;
//! assert_eq!(options.path.as_deref(), Some("rss.channel.item"));
//! assert_eq!(options.complex_parsing, Some(true));
//! # Ok::<(), parsable_core::OpenError>(())
//! ```

use crate::error::OpenError;

/// Optional overrides for parser configuration.
///
/// `None` means "use the format default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Treat the first row as field names (tabular).
    pub headings: Option<bool>,
    /// Field delimiter byte (tabular).
    pub delimiter: Option<u8>,
    /// Field enclosure (quote) byte (tabular).
    pub enclosure: Option<u8>,
    /// Declared encoding. Informational only.
    pub encoding: Option<String>,
    /// Dot-separated element path locating the extraction root (hierarchical).
    pub path: Option<String>,
    /// Element name filter (hierarchical).
    pub tag: Option<String>,
    /// Represent elements as tag/value/attributes envelopes (hierarchical).
    pub complex_parsing: Option<bool>,
    /// Maximum element nesting depth (hierarchical).
    pub max_depth: Option<usize>,
}

impl Options {
    /// Options with every field left to the format default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `headings`.
    pub fn headings(mut self, headings: bool) -> Self {
        self.headings = Some(headings);
        self
    }

    /// Set `delimiter`.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set `enclosure`.
    pub fn enclosure(mut self, enclosure: u8) -> Self {
        self.enclosure = Some(enclosure);
        self
    }

    /// Set `encoding`.
    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Set `path`.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set `tag`.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set `complex_parsing`.
    pub fn complex_parsing(mut self, complex: bool) -> Self {
        self.complex_parsing = Some(complex);
        self
    }

    /// Set `max_depth`.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Build options from string key/value pairs.
    ///
    /// Accepts the keys `headings`, `delimiter`, `enclosure`, `encoding`,
    /// `path`, `tag`, `complexParsing` (or `complex_parsing`) and `maxDepth`
    /// (or `max_depth`). Later pairs override earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, OpenError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            options.set(key.as_ref(), value.as_ref())?;
        }
        Ok(options)
    }

    /// Set a single option from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), OpenError> {
        match key {
            "headings" => self.headings = Some(parse_bool(key, value)?),
            "delimiter" => self.delimiter = Some(parse_byte(key, value)?),
            "enclosure" => self.enclosure = Some(parse_byte(key, value)?),
            "encoding" => self.encoding = Some(value.to_string()),
            "path" => self.path = Some(value.to_string()),
            "tag" => self.tag = Some(value.to_string()),
            "complexParsing" | "complex_parsing" => {
                self.complex_parsing = Some(parse_bool(key, value)?)
            }
            "maxDepth" | "max_depth" => {
                let depth = value.trim().parse::<usize>().map_err(|e| {
                    OpenError::invalid_option(key, format!("expected a number: {}", e))
                })?;
                self.max_depth = Some(depth);
            }
            _ => return Err(OpenError::invalid_option(key, "unknown option")),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, OpenError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(OpenError::invalid_option(
            key,
            format!("expected a boolean, got '{}'", other),
        )),
    }
}

fn parse_byte(key: &str, value: &str) -> Result<u8, OpenError> {
    if value == "\\t" {
        return Ok(b'\t');
    }
    match value.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(OpenError::invalid_option(
            key,
            format!("expected a single byte, got '{}'", value),
        )),
    }
}
