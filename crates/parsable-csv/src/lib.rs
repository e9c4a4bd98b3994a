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

//! Delimited text parsing for Parsable.
//!
//! Reads CSV (or any single-byte-delimited text) into rows:
//!
//! - without headings, each row is an `Indexed` list of fields
//! - with headings, the first row names the fields and each later row is a
//!   `Keyed` mapping from those names
//!
//! Tokenization is delegated to the [`csv`] crate.
//!
//! # Examples
//!
//! ```rust
//! use parsable_core::{Node, Options};
//! use parsable_csv::{read_str, CsvConfig};
//!
//! let config = CsvConfig::default().resolve(&Options::new().headings(true));
//! let rows = read_str("name,age\nAlice,30\nBob,25\n", &config)?;
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows.at(0).and_then(|row| row.get("age")), Some(&Node::leaf("30")));
//! # Ok::<(), parsable_core::ParseError>(())
//! ```

mod config;
mod parser;
mod rows;

pub use config::CsvConfig;
pub use parser::CsvFileParser;
pub use rows::{read_rows, read_str};
