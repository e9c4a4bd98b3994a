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

//! Event-to-tree reduction.
//!
//! The reducer makes one forward pass over an [`EventSource`], recursing once
//! per element. Each recursive call owns one element's content (its "scope")
//! and returns when it sees that element's end tag.
//!
//! # Path navigation
//!
//! With `path = ["rss", "channel", "item"]`, the reducer walks down
//! `rss > channel`, skipping every other subtree, and each `channel` scope
//! becomes a destination: only its `item` children are reduced, each
//! appended to the result sequence. Sibling `channel` elements are all
//! visited, so items from every branch of the chain end up in one sequence.
//!
//! Input that stops inside an open element is an error, never a partial
//! tree.
//!
//! # Placement of child elements
//!
//! In priority order:
//!
//! 1. a `tag` is set and the element has another name: the element is
//!    flattened, its reduced content spliced into the parent when it is a
//!    non-empty sequence and dropped otherwise;
//! 2. the element is the repeating unit (the terminal path segment at the
//!    destination, or the `tag`): it is appended to the parent sequence;
//! 3. otherwise it is stored under its name, a repeated name replacing the
//!    earlier value.
//!
//! With complex parsing, appended and named elements alike are appended as
//! [`Node::Complex`] envelopes.

use crate::config::XmlConfig;
use crate::event::{EventSource, QuickXmlSource, XmlEvent};
use parsable_core::{IndexMap, Node, ParseError, ParseResult};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Flatten,
    Append,
    Field,
}

#[derive(Debug, Clone, Copy)]
enum Scope<'p> {
    /// Ordinary element content.
    Free,
    /// The scope where the path ends; only the named elements are kept.
    Destination(&'p str),
}

/// Reduce the events of `source` into a tree according to `config`.
///
/// The root is always a collection: a document reducing to bare text yields
/// a one-element sequence and an empty reduction yields an empty sequence.
pub fn reduce(source: &mut dyn EventSource, config: &XmlConfig) -> ParseResult<Node> {
    let reducer = Reducer { config };
    let root = match config.path.split_last() {
        None => reducer.scope(source, Scope::Free, 0)?,
        Some((terminal, steps)) => reducer.navigate(source, steps, terminal, 0)?,
    };
    Ok(into_collection(root))
}

/// Reduce an in-memory document.
pub fn reduce_str(xml: &str, config: &XmlConfig) -> ParseResult<Node> {
    let mut source = QuickXmlSource::from_text(xml);
    reduce(&mut source, config)
}

struct Reducer<'c> {
    config: &'c XmlConfig,
}

impl Reducer<'_> {
    fn enter(&self, depth: usize) -> ParseResult<()> {
        if depth > self.config.max_depth {
            return Err(ParseError::RecursionLimitExceeded {
                max: self.config.max_depth,
            });
        }
        Ok(())
    }

    /// Look for `steps[0]` among the children of the current scope.
    ///
    /// Every matching child is followed, so items under repeated branches of
    /// the chain are concatenated in document order.
    fn navigate(
        &self,
        source: &mut dyn EventSource,
        steps: &[String],
        terminal: &str,
        depth: usize,
    ) -> ParseResult<Node> {
        self.enter(depth)?;
        let Some((next, rest)) = steps.split_first() else {
            trace!(terminal, depth, "path destination reached");
            return self.scope(source, Scope::Destination(terminal), depth);
        };

        let mut items = Vec::new();
        loop {
            let Some(event) = source.next_event()? else {
                if depth > 0 {
                    return Err(ParseError::UnexpectedEnd);
                }
                break;
            };
            match event {
                XmlEvent::Start { name, empty, .. } if name == *next => {
                    trace!(segment = next.as_str(), depth, "path segment matched");
                    if empty {
                        continue;
                    }
                    if let Node::Indexed(found) = self.navigate(source, rest, terminal, depth + 1)? {
                        items.extend(found);
                    }
                }
                XmlEvent::Start { empty: false, .. } => skip_subtree(source)?,
                XmlEvent::End { .. } => break,
                _ => {}
            }
        }
        Ok(Node::Indexed(items))
    }

    /// Reduce the content of one element, up to its end tag.
    fn scope(&self, source: &mut dyn EventSource, scope: Scope<'_>, depth: usize) -> ParseResult<Node> {
        self.enter(depth)?;
        let mut text = String::new();
        let mut fields: IndexMap<String, Node> = IndexMap::new();
        let mut items: Vec<Node> = Vec::new();

        loop {
            let Some(event) = source.next_event()? else {
                if depth > 0 {
                    return Err(ParseError::UnexpectedEnd);
                }
                break;
            };
            let (name, attributes, empty) = match event {
                XmlEvent::Start {
                    name,
                    attributes,
                    empty,
                } => (name, attributes, empty),
                XmlEvent::End { .. } => break,
                XmlEvent::Text(chunk) | XmlEvent::CData(chunk) => {
                    if let Scope::Free = scope {
                        text.push_str(&chunk);
                    }
                    continue;
                }
                XmlEvent::Other => continue,
            };

            if let Scope::Destination(terminal) = scope {
                if name != terminal {
                    if !empty {
                        skip_subtree(source)?;
                    }
                    continue;
                }
            }

            let placement = self.place(&name, scope);
            let value = if empty {
                Node::empty()
            } else {
                self.scope(source, Scope::Free, depth + 1)?
            };

            match placement {
                Placement::Flatten => {
                    if let Node::Indexed(children) = value {
                        items.extend(children);
                    }
                }
                Placement::Append if self.config.complex_parsing => items.push(Node::Complex {
                    tag: name,
                    value: Box::new(value),
                    attributes: attributes.into_iter().collect(),
                }),
                Placement::Append => items.push(value),
                Placement::Field => {
                    fields.insert(name, value);
                }
            }
        }

        // Mixed content is not represented: child entries win over text.
        Ok(if !fields.is_empty() {
            Node::Keyed(fields)
        } else if !items.is_empty() {
            Node::Indexed(items)
        } else {
            Node::Leaf(text)
        })
    }

    fn place(&self, name: &str, scope: Scope<'_>) -> Placement {
        let tag = self.config.tag.as_deref();
        if tag.is_some_and(|tag| tag != name) {
            return Placement::Flatten;
        }
        let repeating =
            matches!(scope, Scope::Destination(terminal) if terminal == name) || tag == Some(name);
        if repeating || self.config.complex_parsing {
            Placement::Append
        } else {
            Placement::Field
        }
    }
}

/// Consume events up to the end tag matching an already-read start tag.
fn skip_subtree(source: &mut dyn EventSource) -> ParseResult<()> {
    let mut open = 1usize;
    while open > 0 {
        match source.next_event()? {
            Some(XmlEvent::Start { empty: false, .. }) => open += 1,
            Some(XmlEvent::End { .. }) => open -= 1,
            Some(_) => {}
            None => return Err(ParseError::UnexpectedEnd),
        }
    }
    Ok(())
}

fn into_collection(root: Node) -> Node {
    match root {
        Node::Leaf(text) if text.is_empty() => Node::Indexed(Vec::new()),
        Node::Leaf(text) => Node::Indexed(vec![Node::Leaf(text)]),
        other => other,
    }
}
