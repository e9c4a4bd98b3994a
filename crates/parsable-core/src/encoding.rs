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

//! Character encoding sniffing.
//!
//! Answers the same question as libmagic's `MIME_ENCODING` query, from the
//! first bytes of a file: `utf-8`, `us-ascii`, `utf-16le`, `utf-16be`,
//! `iso-8859-1` or `binary`.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Number of leading bytes inspected.
pub const SNIFF_LEN: usize = 8192;

/// Detect the encoding of the file at `path`.
///
/// Returns `None` when the file cannot be read; that is logged as a warning
/// rather than treated as an error.
pub fn sniff_encoding(path: &Path) -> Option<String> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    let read = File::open(path).and_then(|file| file.take(SNIFF_LEN as u64).read_to_end(&mut head));
    match read {
        Ok(_) => Some(sniff_bytes(&head).to_string()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "encoding detection failed");
            None
        }
    }
}

/// Classify a byte prefix.
pub fn sniff_bytes(head: &[u8]) -> &'static str {
    match head {
        [0xEF, 0xBB, 0xBF, ..] => return "utf-8",
        [0xFF, 0xFE, ..] => return "utf-16le",
        [0xFE, 0xFF, ..] => return "utf-16be",
        _ => {}
    }
    if head.contains(&0) {
        return "binary";
    }
    if head.is_ascii() {
        return "us-ascii";
    }
    match std::str::from_utf8(head) {
        Ok(_) => "utf-8",
        // A multi-byte sequence cut off by the sniff window is still UTF-8.
        Err(e) if e.error_len().is_none() => "utf-8",
        Err(_) => "iso-8859-1",
    }
}
