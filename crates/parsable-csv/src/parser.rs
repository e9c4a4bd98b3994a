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

//! The CSV implementation of [`ParsableFile`].

use crate::config::CsvConfig;
use crate::rows::read_rows;
use parsable_core::{
    open_file, sniff_encoding, Capability, Node, OpenError, Options, ParsableFile, ParseResult,
    ParserState,
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

type Tokenizer = csv::Reader<BufReader<File>>;

/// Tabular parser for delimited text files.
///
/// # Examples
///
/// ```rust,no_run
/// use parsable_core::{Options, ParsableFile};
/// use parsable_csv::CsvFileParser;
///
/// let mut parser = CsvFileParser::open_path("famous.csv", &Options::new().headings(true))?;
/// println!("encoded as {:?}", parser.encoding());
/// for (_, row) in parser.cursor()? {
///     println!("{:?}", row.get("name"));
/// }
/// parser.close();
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Default)]
pub struct CsvFileParser {
    state: ParserState<Tokenizer>,
    config: CsvConfig,
}

impl CsvFileParser {
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

    /// Configuration resolved at open time.
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }
}

impl ParsableFile for CsvFileParser {
    fn capability(&self) -> Capability {
        Capability::Tabular
    }

    fn open(&mut self, path: &Path, options: &Options) -> Result<(), OpenError> {
        let file = open_file(path)?;
        let encoding = sniff_encoding(path);
        self.config = CsvConfig::with_encoding(encoding.clone()).resolve(options);
        debug!(
            path = %path.display(),
            encoding = ?encoding,
            config = ?self.config,
            "opened CSV file"
        );
        self.state.open(self.config.reader(file), encoding);
        Ok(())
    }

    fn parse(&mut self) -> ParseResult<&Node> {
        let headings = self.config.headings;
        self.state
            .parse_with(|reader| read_rows(reader, headings))
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

impl std::fmt::Debug for CsvFileParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvFileParser")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish()
    }
}
