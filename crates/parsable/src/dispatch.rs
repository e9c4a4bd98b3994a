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

//! Extension-based dispatch to a concrete parser.

use crate::registry::Registry;
use parsable_core::{
    Capability, FormatError, Node, OpenError, Options, ParsableFile, ParseResult,
    PreconditionError,
};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A [`ParsableFile`] that picks its implementation from the file extension.
///
/// Before any file is opened (and after `close`) the dispatcher reports
/// [`Capability::Hierarchical`] and behaves like an unopened parser.
///
/// # Examples
///
/// ```rust,no_run
/// use parsable::{FileParser, Options, ParsableFile};
///
/// let mut parser = FileParser::new();
/// parser.open("famous.csv".as_ref(), &Options::new().headings(true))?;
/// assert_eq!(parser.extension(), Some("csv"));
/// for (index, row) in parser.cursor()? {
///     println!("{index}: {row:?}");
/// }
/// parser.close();
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct FileParser<'r> {
    registry: &'r Registry,
    selected: Option<Selected>,
}

struct Selected {
    extension: String,
    parser: Box<dyn ParsableFile>,
}

impl FileParser<'static> {
    /// A dispatcher over [`Registry::global`].
    pub fn new() -> Self {
        Self::with_registry(Registry::global())
    }

    /// Create a dispatcher and open `path` right away.
    pub fn open_path(path: impl AsRef<Path>, options: &Options) -> Result<Self, OpenError> {
        let mut parser = Self::new();
        parser.open(path.as_ref(), options)?;
        Ok(parser)
    }
}

impl Default for FileParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> FileParser<'r> {
    /// A dispatcher over a caller-supplied registry.
    pub fn with_registry(registry: &'r Registry) -> Self {
        Self {
            registry,
            selected: None,
        }
    }

    /// Lowercased extension of the open file.
    pub fn extension(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.extension.as_str())
    }
}

impl ParsableFile for FileParser<'_> {
    fn capability(&self) -> Capability {
        self.selected
            .as_ref()
            .map_or(Capability::Hierarchical, |s| s.parser.capability())
    }

    fn open(&mut self, path: &Path, options: &Options) -> Result<(), OpenError> {
        self.close();
        if !path.exists() {
            return Err(OpenError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| FormatError::MissingExtension {
                path: path.to_path_buf(),
            })?
            .to_ascii_lowercase();
        let mut parser = self.registry.create(&extension)?;
        debug!(path = %path.display(), %extension, capability = %parser.capability(), "dispatching");
        parser.open(path, options)?;
        self.selected = Some(Selected { extension, parser });
        Ok(())
    }

    fn parse(&mut self) -> ParseResult<&Node> {
        match &mut self.selected {
            Some(selected) => selected.parser.parse(),
            None => Err(PreconditionError::NotOpen.into()),
        }
    }

    fn encoding(&self) -> Option<&str> {
        self.selected.as_ref().and_then(|s| s.parser.encoding())
    }

    fn close(&mut self) {
        if let Some(mut selected) = self.selected.take() {
            selected.parser.close();
            debug!(extension = %selected.extension, "closed");
        }
    }

    fn is_open(&self) -> bool {
        self.selected.as_ref().is_some_and(|s| s.parser.is_open())
    }
}

impl fmt::Debug for FileParser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileParser")
            .field("extension", &self.extension())
            .field("open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsable_core::ParseError;
    use std::fs;

    #[test]
    fn test_unopened() {
        let mut parser = FileParser::new();
        assert!(!parser.is_open());
        assert_eq!(parser.extension(), None);
        assert_eq!(parser.encoding(), None);
        assert_eq!(parser.capability(), Capability::Hierarchical);
        assert!(matches!(
            parser.data(),
            Err(ParseError::Precondition(PreconditionError::NotOpen))
        ));
        parser.close();
    }

    #[test]
    fn test_uppercase_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DATA.CSV");
        fs::write(&path, "a,b\n1,2\n").unwrap();

        let mut parser = FileParser::open_path(&path, &Options::new()).unwrap();
        assert_eq!(parser.extension(), Some("csv"));
        assert_eq!(parser.capability(), Capability::Tabular);
        assert_eq!(parser.data().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README");
        fs::write(&path, "hello").unwrap();

        let err = FileParser::new().open(&path, &Options::new()).unwrap_err();
        assert!(matches!(
            err,
            OpenError::Format(FormatError::MissingExtension { .. })
        ));
    }

    #[test]
    fn test_not_found_checked_first() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileParser::new()
            .open(&dir.path().join("absent.json"), &Options::new())
            .unwrap_err();
        assert!(matches!(err, OpenError::NotFound { .. }));
    }

    #[test]
    fn test_failed_open_releases_previous() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.xml");
        fs::write(&good, "<a/>").unwrap();

        let mut parser = FileParser::open_path(&good, &Options::new()).unwrap();
        assert!(parser.is_open());
        assert!(parser
            .open(&dir.path().join("b.json"), &Options::new())
            .is_err());
        assert!(!parser.is_open());
        assert_eq!(parser.extension(), None);
    }
}
