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

//! Open/parse/close bookkeeping shared by the concrete parsers.

use crate::error::{ParseResult, PreconditionError};
use crate::node::Node;
use std::fmt;
use tracing::{debug, warn};

enum Stage<S> {
    Closed,
    Open(S),
    // The source is held until close so the underlying file stays open.
    Parsed { _source: S, data: Node },
    Failed,
}

impl<S> Stage<S> {
    fn name(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open(_) => "open",
            Self::Parsed { .. } => "parsed",
            Self::Failed => "failed",
        }
    }
}

/// Lifecycle of a parser owning one source of type `S`.
///
/// - `open` stores the source and the detected encoding, replacing any
///   previous source.
/// - `parse_with` runs the reducer once and memoizes the result. A failing
///   reducer drops the source and leaves the state failed, so a partial
///   result is never observable.
/// - `close` drops source, result and encoding, and may be called any number
///   of times.
pub struct ParserState<S> {
    stage: Stage<S>,
    encoding: Option<String>,
}

impl<S> ParserState<S> {
    /// A closed state.
    pub fn new() -> Self {
        Self {
            stage: Stage::Closed,
            encoding: None,
        }
    }

    /// Take ownership of a freshly opened source.
    pub fn open(&mut self, source: S, encoding: Option<String>) {
        if !matches!(self.stage, Stage::Closed) {
            debug!(stage = self.stage.name(), "reopening, previous source released");
        }
        self.stage = Stage::Open(source);
        self.encoding = encoding;
    }

    /// True between a successful `open` and `close`, unless parsing failed.
    pub fn is_open(&self) -> bool {
        matches!(self.stage, Stage::Open(_) | Stage::Parsed { .. })
    }

    /// True once a result has been materialized.
    pub fn is_parsed(&self) -> bool {
        matches!(self.stage, Stage::Parsed { .. })
    }

    /// Encoding captured at open time.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// The memoized result, if parsing already ran.
    pub fn cached(&self) -> Option<&Node> {
        match &self.stage {
            Stage::Parsed { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Run `reduce` over the source unless a result is already cached.
    pub fn parse_with<F>(&mut self, reduce: F) -> ParseResult<&Node>
    where
        F: FnOnce(&mut S) -> ParseResult<Node>,
    {
        match std::mem::replace(&mut self.stage, Stage::Failed) {
            Stage::Open(mut source) => match reduce(&mut source) {
                Ok(data) => {
                    debug!(entries = data.len(), "parse complete");
                    self.stage = Stage::Parsed {
                        _source: source,
                        data,
                    };
                }
                Err(e) => {
                    warn!(error = %e, "parse failed, source released");
                    return Err(e);
                }
            },
            parsed @ Stage::Parsed { .. } => self.stage = parsed,
            Stage::Closed => {
                self.stage = Stage::Closed;
                return Err(PreconditionError::NotOpen.into());
            }
            Stage::Failed => return Err(PreconditionError::ParseFailed.into()),
        }
        self.cached()
            .ok_or_else(|| PreconditionError::NotOpen.into())
    }

    /// Release the source and forget the result.
    pub fn close(&mut self) {
        if !matches!(self.stage, Stage::Closed) {
            debug!(stage = self.stage.name(), "closing");
        }
        self.stage = Stage::Closed;
        self.encoding = None;
    }
}

impl<S> Default for ParserState<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for ParserState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserState")
            .field("stage", &self.stage.name())
            .field("encoding", &self.encoding)
            .finish()
    }
}
