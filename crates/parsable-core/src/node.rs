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

//! The value tree produced by every parser.

use crate::cursor::Cursor;
use indexmap::IndexMap;

/// A node of a parsed result.
///
/// Tabular data is an `Indexed` list of rows. Hierarchical data is a nested
/// mix of `Keyed` and `Indexed` nodes with `Leaf` text at the bottom, or
/// `Complex` envelopes when complex parsing is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Node {
    /// Text content.
    Leaf(String),
    /// Named children, in document order.
    Keyed(IndexMap<String, Node>),
    /// Ordered children.
    Indexed(Vec<Node>),
    /// An element with its tag name and attributes kept alongside its value.
    Complex {
        /// Element name.
        tag: String,
        /// Reduced element content.
        value: Box<Node>,
        /// Attribute name to value.
        attributes: IndexMap<String, String>,
    },
}

impl Node {
    /// An empty `Leaf`.
    pub fn empty() -> Self {
        Self::Leaf(String::new())
    }

    /// Create a leaf from text.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// Try to get the node as text.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the node as a keyed mapping.
    pub fn as_keyed(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Self::Keyed(map) => Some(map),
            _ => None,
        }
    }

    /// Try to get the node as an ordered sequence.
    pub fn as_indexed(&self) -> Option<&[Node]> {
        match self {
            Self::Indexed(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get the `(tag, value, attributes)` of a complex node.
    pub fn as_complex(&self) -> Option<(&str, &Node, &IndexMap<String, String>)> {
        match self {
            Self::Complex {
                tag,
                value,
                attributes,
            } => Some((tag, value, attributes)),
            _ => None,
        }
    }

    /// Look up a named child of a keyed node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_keyed().and_then(|map| map.get(key))
    }

    /// Look up a positional child of an indexed node.
    pub fn at(&self, index: usize) -> Option<&Node> {
        self.as_indexed().and_then(|items| items.get(index))
    }

    /// Number of top-level entries. Leaves and complex nodes count as zero.
    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(map) => map.len(),
            Self::Indexed(items) => items.len(),
            Self::Leaf(_) | Self::Complex { .. } => 0,
        }
    }

    /// True when the node has no top-level entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forward cursor over the top-level entries.
    pub fn entries(&self) -> Cursor<'_> {
        Cursor::new(self)
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::Indexed(Vec::new())
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Leaf(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Leaf(text)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::Indexed(items)
    }
}

impl From<IndexMap<String, Node>> for Node {
    fn from(map: IndexMap<String, Node>) -> Self {
        Self::Keyed(map)
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = (crate::cursor::Key<'a>, &'a Node);
    type IntoIter = Cursor<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}
