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

//! Single-pass traversal over a parsed result.

use crate::node::Node;
use indexmap::map;
use std::fmt;
use std::iter::FusedIterator;
use std::slice;

/// Position of an entry within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    /// Position in an `Indexed` node.
    Index(usize),
    /// Field name in a `Keyed` node.
    Name(&'a str),
}

impl Key<'_> {
    /// The position, for indexed entries.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Name(_) => None,
        }
    }

    /// The field name, for keyed entries.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Index(_) => None,
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{}", i),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

enum Entries<'a> {
    Indexed(std::iter::Enumerate<slice::Iter<'a, Node>>),
    Keyed(map::Iter<'a, String, Node>),
    Exhausted,
}

/// Forward-only cursor over the top-level entries of a [`Node`].
///
/// Keyed entries come out in insertion order. A cursor cannot be rewound;
/// ask for a fresh one to traverse again. Leaf and complex nodes have no
/// top-level entries.
pub struct Cursor<'a> {
    entries: Entries<'a>,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned before the first entry of `node`.
    pub fn new(node: &'a Node) -> Self {
        let entries = match node {
            Node::Indexed(items) => Entries::Indexed(items.iter().enumerate()),
            Node::Keyed(fields) => Entries::Keyed(fields.iter()),
            Node::Leaf(_) | Node::Complex { .. } => Entries::Exhausted,
        };
        Self { entries }
    }

    /// True once every entry has been yielded.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.entries, Entries::Exhausted)
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = (Key<'a>, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let next = match &mut self.entries {
            Entries::Indexed(iter) => iter.next().map(|(i, node)| (Key::Index(i), node)),
            Entries::Keyed(iter) => iter.next().map(|(k, node)| (Key::Name(k.as_str()), node)),
            Entries::Exhausted => None,
        };
        if next.is_none() {
            self.entries = Entries::Exhausted;
        }
        next
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.entries {
            Entries::Indexed(iter) => iter.size_hint(),
            Entries::Keyed(iter) => iter.size_hint(),
            Entries::Exhausted => (0, Some(0)),
        }
    }
}

impl FusedIterator for Cursor<'_> {}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("remaining", &self.size_hint().0)
            .finish()
    }
}
