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

//! XML parsing for Parsable.
//!
//! Turns an XML document into a [`Node`](parsable_core::Node) tree by
//! reducing its event stream. Three orthogonal options shape the tree:
//!
//! - `path`: a dot-separated element path such as `rss.channel.item`; the
//!   elements named by its last segment, found under the chain, become the
//!   entries of the result
//! - `tag`: only elements with this name become entries, wherever they are;
//!   the elements around them are flattened away
//! - `complex_parsing`: every element becomes a `tag`/`value`/`attributes`
//!   envelope
//!
//! # Examples
//!
//! ```rust
//! use parsable_core::{Node, Options};
//! use parsable_xml::{reduce_str, XmlConfig};
//!
//! let xml = "<rss><channel><item><title>A</title></item><item><title>B</title></item></channel></rss>";
//! let config = XmlConfig::default().resolve(&Options::new().path("rss.channel.item"));
//! let items = reduce_str(xml, &config)?;
//!
//! assert_eq!(items.len(), 2);
//! assert_eq!(items.at(1).and_then(|item| item.get("title")), Some(&Node::leaf("B")));
//! # Ok::<(), parsable_core::ParseError>(())
//! ```
//!
//! Reading from a file goes through [`XmlFileParser`], which implements the
//! common [`ParsableFile`](parsable_core::ParsableFile) contract.

mod config;
mod event;
mod parser;
mod reduce;

pub use config::{XmlConfig, DEFAULT_MAX_DEPTH};
pub use event::{EventSource, QuickXmlSource, XmlEvent};
pub use parser::XmlFileParser;
pub use reduce::{reduce, reduce_str};
