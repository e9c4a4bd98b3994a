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

//! Shared test fixtures and utilities for Parsable format parsers.
//!
//! - [`fixtures`]: sample documents and a helper writing them to disk
//! - [`RecordingSource`]: an [`EventSource`] that counts what it hands out
//!
//! # Quick Start
//!
//! ```rust
//! use parsable_test::fixtures;
//!
//! let (_dir, path) = fixtures::write_temp("news.xml", fixtures::NEWS_XML);
//! assert!(path.exists());
//! ```

pub mod fixtures;
mod recording;

pub use recording::{EventCounter, RecordingSource};

pub use parsable_xml::{EventSource, XmlEvent};
