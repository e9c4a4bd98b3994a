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

//! Core data model and parser contract for Parsable.
//!
//! Every format crate (`parsable-csv`, `parsable-xml`) builds on the pieces
//! defined here:
//!
//! - [`Node`]: the value tree a parse produces
//! - [`Options`]: caller overrides resolved by each format into its config
//! - [`ParsableFile`]: the open/parse/data/encoding/close contract
//! - [`ParserState`]: memoizing lifecycle bookkeeping for implementations
//! - [`Cursor`]: single-pass iteration over a result
//! - [`encoding`]: encoding sniffing used at open time
//!
//! # Examples
//!
//! ```rust
//! use parsable_core::{Key, Node};
//!
//! let rows = Node::Indexed(vec![Node::leaf("Alice"), Node::leaf("Bob")]);
//! let names: Vec<_> = rows
//!     .entries()
//!     .map(|(key, node)| (key, node.as_leaf().unwrap_or_default()))
//!     .collect();
//! assert_eq!(names, vec![(Key::Index(0), "Alice"), (Key::Index(1), "Bob")]);
//! ```

mod cursor;
pub mod encoding;
mod error;
mod file;
mod lifecycle;
mod node;
mod options;

pub use cursor::{Cursor, Key};
pub use encoding::sniff_encoding;
pub use error::{
    Capability, Error, FormatError, OpenError, ParseError, ParseResult, PreconditionError,
};
pub use file::{open_file, ParsableFile};
pub use indexmap::IndexMap;
pub use lifecycle::ParserState;
pub use node::Node;
pub use options::Options;
