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

//! The contract every format parser implements.

use crate::cursor::Cursor;
use crate::error::{Capability, OpenError, ParseResult};
use crate::node::Node;
use crate::options::Options;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A parser bound to at most one open file at a time.
///
/// The lifecycle is `open` → `parse` (memoized) → `close`. Implementations
/// own their resource exclusively and are not meant to be shared between
/// threads.
///
/// # Examples
///
/// ```rust,no_run
/// use parsable_core::{Options, ParsableFile};
///
/// fn dump(parser: &mut dyn ParsableFile) -> Result<(), Box<dyn std::error::Error>> {
///     parser.open("famous.csv".as_ref(), &Options::new().headings(true))?;
///     println!("encoding: {:?}", parser.encoding());
///     for (key, row) in parser.cursor()? {
///         println!("{}: {:?}", key, row);
///     }
///     parser.close();
///     Ok(())
/// }
/// ```
pub trait ParsableFile {
    /// The kind of data this parser produces.
    fn capability(&self) -> Capability;

    /// Open `path`, detect its encoding and resolve `options` against the
    /// format defaults. A successful open replaces any previously opened file.
    fn open(&mut self, path: &Path, options: &Options) -> Result<(), OpenError>;

    /// Materialize the whole result. Later calls return the cached result.
    fn parse(&mut self) -> ParseResult<&Node>;

    /// The parsed result, parsing first if needed.
    fn data(&mut self) -> ParseResult<&Node> {
        self.parse()
    }

    /// Encoding detected when the file was opened.
    fn encoding(&self) -> Option<&str>;

    /// Release the file and the result. Safe to call repeatedly.
    fn close(&mut self);

    /// True while a file is held open.
    fn is_open(&self) -> bool;

    /// Forward cursor over the top-level entries of [`data`](Self::data).
    fn cursor(&mut self) -> ParseResult<Cursor<'_>> {
        Ok(Cursor::new(self.data()?))
    }
}

/// Open `path` for buffered reading, reporting a missing file as
/// [`OpenError::NotFound`].
pub fn open_file(path: &Path) -> Result<BufReader<File>, OpenError> {
    if !path.exists() {
        return Err(OpenError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| OpenError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_file(&dir.path().join("missing.xml")).unwrap_err();
        assert!(matches!(err, OpenError::NotFound { .. }));
    }

    #[test]
    fn test_open_file_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // Opening a directory succeeds on some platforms, so only check that a
        // failure is never reported as NotFound.
        if let Err(err) = open_file(dir.path()) {
            assert!(matches!(err, OpenError::Io { .. }));
        }
    }

    #[test]
    fn test_open_file_existing() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(open_file(file.path()).is_ok());
    }
}
