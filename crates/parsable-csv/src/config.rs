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

//! Configuration for delimited text.

use parsable_core::Options;
use std::io::Read;

/// Resolved CSV parsing configuration.
///
/// # Examples
///
/// ```
/// # use parsable_csv::CsvConfig;
/// let config = CsvConfig::default();
/// assert!(!config.headings);
/// assert_eq!(config.delimiter, b',');
/// assert_eq!(config.enclosure, b'"');
/// ```
///
/// Semicolon-separated with a header row:
///
/// ```
/// # use parsable_core::Options;
/// # use parsable_csv::CsvConfig;
/// let config = CsvConfig::default().resolve(&Options::new().headings(true).delimiter(b';'));
/// assert!(config.headings);
/// assert_eq!(config.delimiter, b';');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvConfig {
    /// Whether the first row holds field names (default: `false`).
    ///
    /// When `true`, the first row is consumed as the header and every later
    /// row becomes a mapping from header name to field.
    pub headings: bool,

    /// Field delimiter (default: `,`).
    pub delimiter: u8,

    /// Quote character enclosing fields (default: `"`). Doubled inside an
    /// enclosed field, it stands for itself.
    pub enclosure: u8,

    /// Encoding, informational. Fields are decoded as UTF-8 with invalid
    /// sequences replaced.
    pub encoding: Option<String>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            headings: false,
            delimiter: b',',
            enclosure: b'"',
            encoding: None,
        }
    }
}

impl CsvConfig {
    /// Defaults for a file whose encoding was detected as `encoding`.
    pub fn with_encoding(encoding: Option<String>) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    /// Apply `overrides` on top of `self`.
    pub fn resolve(&self, overrides: &Options) -> Self {
        Self {
            headings: overrides.headings.unwrap_or(self.headings),
            delimiter: overrides.delimiter.unwrap_or(self.delimiter),
            enclosure: overrides.enclosure.unwrap_or(self.enclosure),
            encoding: overrides.encoding.clone().or_else(|| self.encoding.clone()),
        }
    }

    /// Build a tokenizer over `inner` honouring this configuration.
    ///
    /// Rows may have any width; the header row, if any, is handled by the
    /// row reducer rather than the tokenizer.
    pub fn reader<R: Read>(&self, inner: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quote(self.enclosure)
            .from_reader(inner)
    }
}
