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

//! Canonical sample documents.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// An RSS feed with two items under `rss > channel`.
pub const NEWS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Daily News</title>
    <link>https://news.example.com</link>
    <item>
      <title>A</title>
      <link>https://news.example.com/a</link>
    </item>
    <item>
      <title>B</title>
      <link>https://news.example.com/b</link>
    </item>
  </channel>
</rss>
"#;

/// A product catalog with attributes, nested wrappers and CDATA.
pub const CATALOG_XML: &str = r#"<catalog>
  <section name="books">
    <product id="1" currency="EUR"><name>Dune</name><price>9.99</price></product>
    <product id="2" currency="EUR"><name><![CDATA[Bread & Roses]]></name><price>12.50</price></product>
  </section>
  <section name="music">
    <group>
      <product id="3" currency="USD"><name>Blue Train</name><price>15.00</price></product>
    </group>
  </section>
</catalog>
"#;

/// People with a heading row.
pub const FAMOUS_CSV: &str = "name,born,field\n\
Ada Lovelace,1815,mathematics\n\
Alan Turing,1912,computer science\n\
\"Curie, Marie\",1867,physics\n";

/// Semicolon-delimited rows with single-quote enclosure and no heading.
pub const SEMICOLON_CSV: &str = "'a;1';2;3\n4;5;6\n";

/// Rows that are shorter and longer than the heading.
pub const RAGGED_CSV: &str = "a,b,c\n1,2\n3,4,5,6\n";

/// Documents that must fail to parse.
pub fn malformed_xml_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("mismatched_end", "<a><b></a>"),
        ("unknown_entity", "<a>&bogus;</a>"),
        ("duplicate_attribute", "<a x=\"1\" x=\"2\"/>"),
        ("truncated", "<rss><channel><item><title>A</title></item><item><title>B"),
    ]
}

/// Write `content` to `name` inside a fresh temporary directory.
///
/// The directory is removed when the returned [`TempDir`] is dropped, so keep
/// it alive for as long as the path is used.
///
/// # Panics
///
/// Panics if the directory or file cannot be created.
pub fn write_temp(name: &str, content: impl AsRef<[u8]>) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    (dir, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_temp() {
        let (dir, path) = write_temp("famous.csv", FAMOUS_CSV);
        assert!(path.starts_with(dir.path()));
        assert_eq!(fs::read_to_string(&path).unwrap(), FAMOUS_CSV);
        drop(dir);
        assert!(!path.exists());
    }

    #[test]
    fn test_famous_csv_shape() {
        assert_eq!(FAMOUS_CSV.lines().count(), 4);
    }
}
