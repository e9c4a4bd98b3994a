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

//! # Parsable
//!
//! Format-agnostic file parsing. Open a file, get back a tree of [`Node`]s,
//! and walk it with a [`Cursor`], without caring whether it was CSV or XML.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parsable::{get_data, Node, Options};
//!
//! let items = get_data("news.xml", &Options::new().path("rss.channel.item"))?;
//! for (_, item) in items.entries() {
//!     println!("{:?}", item.get("title").and_then(Node::as_leaf));
//! }
//! # Ok::<(), parsable::Error>(())
//! ```
//!
//! ## Modules
//!
//! The data model, options and errors from `parsable-core` are re-exported at
//! the crate root.
//!
//! - [`xml`]: the XML event reducer and [`XmlFileParser`](xml::XmlFileParser)
//! - [`csv`]: the tabular reader and [`CsvFileParser`](csv::CsvFileParser)
//!
//! [`FileParser`] picks one of those by file extension through a
//! [`Registry`]; [`Registry::global`] knows `csv` and `xml`.

mod dispatch;
mod registry;

pub use dispatch::FileParser;
pub use registry::{Constructor, Registry};

pub use parsable_core::{
    encoding, sniff_encoding, Capability, Cursor, Error, FormatError, IndexMap, Key, Node,
    OpenError, Options, ParsableFile, ParseError, ParseResult, ParserState, PreconditionError,
};

pub mod xml {
    //! XML parsing
    pub use parsable_xml::*;
}

pub mod csv {
    //! Delimited text parsing
    pub use parsable_csv::*;
}

use std::path::Path;

/// Open `path`, parse it and close it again.
///
/// The parser is closed on every path, including failures.
pub fn get_data(path: impl AsRef<Path>, options: &Options) -> Result<Node, Error> {
    let mut parser = FileParser::new();
    parser.open(path.as_ref(), options)?;
    let data = parser.data().map(Node::clone);
    parser.close();
    Ok(data?)
}
