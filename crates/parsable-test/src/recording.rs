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

//! An event source that records how often it is pulled.

use parsable_core::ParseError;
use parsable_xml::{EventSource, XmlEvent};
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Shared view of a [`RecordingSource`]'s counters.
///
/// Clones observe the same counters, so a test can keep one after handing the
/// source to a parser.
#[derive(Debug, Clone, Default)]
pub struct EventCounter {
    pulls: Rc<Cell<usize>>,
    events: Rc<Cell<usize>>,
}

impl EventCounter {
    /// Number of `next_event` calls, including the one that hit the end.
    pub fn pulls(&self) -> usize {
        self.pulls.get()
    }

    /// Number of events actually delivered.
    pub fn events(&self) -> usize {
        self.events.get()
    }
}

/// Wraps another [`EventSource`] and counts what flows through it.
#[derive(Debug)]
pub struct RecordingSource<S = VecDeque<XmlEvent>> {
    inner: S,
    counter: EventCounter,
}

impl RecordingSource {
    /// Replay a fixed list of events.
    pub fn from_events(events: impl IntoIterator<Item = XmlEvent>) -> Self {
        Self::new(events.into_iter().collect())
    }
}

impl<S: EventSource> RecordingSource<S> {
    /// Record everything pulled from `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            counter: EventCounter::default(),
        }
    }

    /// A handle on the counters that outlives moves of the source.
    pub fn counter(&self) -> EventCounter {
        self.counter.clone()
    }
}

impl<S: EventSource> EventSource for RecordingSource<S> {
    fn next_event(&mut self) -> Result<Option<XmlEvent>, ParseError> {
        self.counter.pulls.set(self.counter.pulls.get() + 1);
        let event = self.inner.next_event()?;
        if event.is_some() {
            self.counter.events.set(self.counter.events.get() + 1);
        }
        Ok(event)
    }
}
