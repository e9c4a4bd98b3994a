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

//! Error types for opening and parsing files.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The two kinds of data a parser can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Rows of fields (CSV and friends).
    Tabular,
    /// Nested trees (XML).
    Hierarchical,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tabular => write!(f, "tabular"),
            Self::Hierarchical => write!(f, "hierarchical"),
        }
    }
}

/// The file format could not be resolved to a parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The path has no extension to dispatch on.
    #[error("cannot read the extension of {}", .path.display())]
    MissingExtension {
        /// Offending path.
        path: PathBuf,
    },

    /// No parser is registered for the extension.
    #[error("no parser registered for extension '{extension}'")]
    Unregistered {
        /// Lowercased extension.
        extension: String,
    },

    /// A registered constructor produced a parser with the wrong capability.
    #[error("parser for '{extension}' is {found}, expected {expected}")]
    CapabilityMismatch {
        /// Extension being registered.
        extension: String,
        /// Declared capability.
        expected: Capability,
        /// Capability reported by the constructed parser.
        found: Capability,
    },
}

/// An operation was called out of lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// `parse` was called before a successful `open`.
    #[error("call 'open' before 'parse'")]
    NotOpen,

    /// A previous `parse` failed and released the source.
    #[error("a previous parse failed; reopen the file before parsing again")]
    ParseFailed,
}

/// Errors returned by `open`.
#[derive(Debug, Error)]
pub enum OpenError {
    /// The input path does not exist.
    #[error("file {} does not exist", .path.display())]
    NotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// The format could not be resolved.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The file exists but could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        /// File being opened.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// An option key is unknown or its value is malformed.
    #[error("invalid option '{key}': {reason}")]
    InvalidOption {
        /// Option name as given.
        key: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl OpenError {
    /// Create an invalid-option error.
    pub fn invalid_option(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Errors returned by `parse` and by anything that parses on demand.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Lifecycle violation.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// Malformed XML reported by the event source.
    #[error("XML parse error at position {position}: {message}")]
    Xml {
        /// Byte offset in the input.
        position: usize,
        /// Description from the reader.
        message: String,
    },

    /// Malformed delimited text reported by the tokenizer.
    #[error("CSV parse error at line {line}: {message}")]
    Csv {
        /// Line number (1-based, 0 when unknown).
        line: u64,
        /// Description from the tokenizer.
        message: String,
    },

    /// The events ran out inside an open element.
    #[error("document ended inside an open element")]
    UnexpectedEnd,

    /// Elements are nested deeper than the configured limit.
    #[error("element nesting exceeds the maximum depth of {max}")]
    RecursionLimitExceeded {
        /// Configured limit.
        max: usize,
    },

    /// Reading the underlying resource failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Either failure of a full open-and-parse round trip.
#[derive(Debug, Error)]
pub enum Error {
    /// Opening failed.
    #[error(transparent)]
    Open(#[from] OpenError),

    /// Parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Self {
        Self::Open(OpenError::Format(err))
    }
}

impl From<PreconditionError> for Error {
    fn from(err: PreconditionError) -> Self {
        Self::Parse(ParseError::Precondition(err))
    }
}

/// Result alias for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;
