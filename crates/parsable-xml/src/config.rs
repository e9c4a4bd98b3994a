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

//! Configuration for XML reduction.

use parsable_core::Options;

/// Maximum element nesting depth (prevents stack overflow).
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Resolved XML parsing configuration.
///
/// # Examples
///
/// ```rust
/// use parsable_core::Options;
/// use parsable_xml::XmlConfig;
///
/// let config = XmlConfig::default().resolve(&Options::new().path("rss.channel.item"));
/// assert_eq!(config.path, vec!["rss", "channel", "item"]);
/// assert!(!config.complex_parsing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlConfig {
    /// Element names leading to the extraction root. The last one names the
    /// repeating unit collected at the destination.
    pub path: Vec<String>,
    /// Only elements with this name become entries; others are flattened.
    pub tag: Option<String>,
    /// Wrap every element as a tag/value/attributes envelope.
    pub complex_parsing: bool,
    /// Encoding, informational.
    pub encoding: Option<String>,
    /// Maximum element nesting depth.
    pub max_depth: usize,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            path: Vec::new(),
            tag: None,
            complex_parsing: false,
            encoding: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl XmlConfig {
    /// Defaults for a file whose encoding was detected as `encoding`.
    pub fn with_encoding(encoding: Option<String>) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    /// Apply `overrides` on top of `self`.
    ///
    /// The path is split on `.` with empty segments dropped, and an empty tag
    /// counts as no tag.
    pub fn resolve(&self, overrides: &Options) -> Self {
        let mut config = self.clone();
        if let Some(path) = &overrides.path {
            config.path = split_path(path);
        }
        if let Some(tag) = &overrides.tag {
            config.tag = Some(tag.clone()).filter(|t| !t.is_empty());
        }
        if let Some(complex) = overrides.complex_parsing {
            config.complex_parsing = complex;
        }
        if let Some(encoding) = &overrides.encoding {
            config.encoding = Some(encoding.clone());
        }
        if let Some(max_depth) = overrides.max_depth {
            config.max_depth = max_depth;
        }
        config
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
