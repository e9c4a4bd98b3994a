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

//! Extension to parser mapping.

use indexmap::IndexMap;
use parsable_core::{Capability, FormatError, ParsableFile};
use parsable_csv::CsvFileParser;
use parsable_xml::XmlFileParser;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// Builds a fresh, unopened parser.
pub type Constructor = fn() -> Box<dyn ParsableFile>;

#[derive(Clone, Copy)]
struct Entry {
    capability: Capability,
    construct: Constructor,
}

/// Known formats keyed by lowercase file extension.
///
/// # Examples
///
/// ```rust
/// use parsable::{Capability, Registry};
///
/// let registry = Registry::with_defaults();
/// assert_eq!(registry.capability("CSV"), Some(Capability::Tabular));
/// assert_eq!(registry.capability("json"), None);
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    entries: IndexMap<String, Entry>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `csv` and `xml` parsers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert("csv", Capability::Tabular, csv_parser);
        registry.insert("xml", Capability::Hierarchical, xml_parser);
        registry
    }

    /// The process-wide default registry.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::with_defaults)
    }

    /// Register `construct` for `extension`, replacing any earlier entry.
    ///
    /// A probe instance is built to check that it reports `capability`.
    pub fn register(
        &mut self,
        extension: &str,
        capability: Capability,
        construct: Constructor,
    ) -> Result<(), FormatError> {
        let extension = normalize(extension);
        let found = construct().capability();
        if found != capability {
            return Err(FormatError::CapabilityMismatch {
                extension,
                expected: capability,
                found,
            });
        }
        debug!(%extension, %capability, "registered parser");
        self.entries.insert(extension, Entry { capability, construct });
        Ok(())
    }

    /// Declared capability for `extension`, if registered.
    pub fn capability(&self, extension: &str) -> Option<Capability> {
        self.entries
            .get(&normalize(extension))
            .map(|entry| entry.capability)
    }

    /// Build an unopened parser for `extension`.
    pub fn create(&self, extension: &str) -> Result<Box<dyn ParsableFile>, FormatError> {
        let extension = normalize(extension);
        match self.entries.get(&extension) {
            Some(entry) => Ok((entry.construct)()),
            None => Err(FormatError::Unregistered { extension }),
        }
    }

    /// Registered extensions in registration order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn insert(&mut self, extension: &str, capability: Capability, construct: Constructor) {
        self.entries
            .insert(normalize(extension), Entry { capability, construct });
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(extension, entry)| (extension, entry.capability)),
            )
            .finish()
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

fn csv_parser() -> Box<dyn ParsableFile> {
    Box::new(CsvFileParser::new())
}

fn xml_parser() -> Box<dyn ParsableFile> {
    Box::new(XmlFileParser::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let registry = Registry::with_defaults();
        assert_eq!(registry.extensions().collect::<Vec<_>>(), vec!["csv", "xml"]);
        assert_eq!(registry.capability("xml"), Some(Capability::Hierarchical));
        assert_eq!(registry.capability(".Xml"), Some(Capability::Hierarchical));
        assert_eq!(
            registry.create("csv").unwrap().capability(),
            Capability::Tabular
        );
    }

    #[test]
    fn test_unregistered() {
        let err = Registry::new().create("JSON").err().unwrap();
        assert_eq!(
            err,
            FormatError::Unregistered {
                extension: "json".to_string()
            }
        );
    }

    #[test]
    fn test_register_alias() {
        let mut registry = Registry::new();
        registry
            .register("TSV", Capability::Tabular, csv_parser)
            .unwrap();
        assert_eq!(registry.capability("tsv"), Some(Capability::Tabular));
    }

    #[test]
    fn test_register_capability_mismatch() {
        let mut registry = Registry::new();
        let err = registry
            .register("html", Capability::Tabular, xml_parser)
            .unwrap_err();
        assert_eq!(
            err,
            FormatError::CapabilityMismatch {
                extension: "html".to_string(),
                expected: Capability::Tabular,
                found: Capability::Hierarchical,
            }
        );
        assert_eq!(registry.capability("html"), None);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(Registry::global(), Registry::global()));
        assert_eq!(Registry::global().capability("csv"), Some(Capability::Tabular));
    }
}
