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

//! Rows from delimited text.

use crate::config::CsvConfig;
use parsable_core::{IndexMap, Node, ParseError, ParseResult};
use std::io::Read;
use tracing::warn;

/// Reduce every record of `reader` into rows.
///
/// Without headings each row is an `Indexed` list of fields. With headings the
/// first record is consumed as the header and each later row is `Keyed` by a
/// positional zip with it: fields beyond the header are ignored and missing
/// fields are absent. A header name given twice keeps its first position and
/// the later column's value.
pub fn read_rows<R: Read>(reader: &mut csv::Reader<R>, headings: bool) -> ParseResult<Node> {
    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for record in reader.byte_records() {
        let record = record.map_err(csv_error)?;
        let fields: Vec<String> = record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();

        if !headings {
            rows.push(Node::Indexed(fields.into_iter().map(Node::Leaf).collect()));
            continue;
        }

        let Some(names) = &header else {
            header = Some(fields);
            continue;
        };
        if fields.len() != names.len() {
            warn!(
                line = record.position().map(|p| p.line()),
                expected = names.len(),
                found = fields.len(),
                "row width differs from header"
            );
        }
        let row: IndexMap<String, Node> = names
            .iter()
            .cloned()
            .zip(fields.into_iter().map(Node::Leaf))
            .collect();
        rows.push(Node::Keyed(row));
    }

    Ok(Node::Indexed(rows))
}

/// Parse in-memory delimited text.
pub fn read_str(text: &str, config: &CsvConfig) -> ParseResult<Node> {
    read_rows(&mut config.reader(text.as_bytes()), config.headings)
}

fn csv_error(err: csv::Error) -> ParseError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = err.to_string();
    if let csv::ErrorKind::Io(io) = err.into_kind() {
        return ParseError::Io(io);
    }
    ParseError::Csv { line, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsable_core::Options;

    fn run(text: &str, options: Options) -> Node {
        read_str(text, &CsvConfig::default().resolve(&options)).unwrap()
    }

    fn row(pairs: &[(&str, &str)]) -> Node {
        Node::Keyed(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Node::leaf(*v)))
                .collect(),
        )
    }

    fn fields(values: &[&str]) -> Node {
        Node::Indexed(values.iter().map(|v| Node::leaf(*v)).collect())
    }

    #[test]
    fn test_headings_scenario() {
        let data = run("name,age\nAlice,30\nBob,25\n", Options::new().headings(true));
        assert_eq!(
            data,
            Node::Indexed(vec![
                row(&[("name", "Alice"), ("age", "30")]),
                row(&[("name", "Bob"), ("age", "25")]),
            ])
        );
    }

    #[test]
    fn test_rows_without_headings() {
        let data = run("name,age\nAlice,30\n", Options::new());
        assert_eq!(
            data,
            Node::Indexed(vec![fields(&["name", "age"]), fields(&["Alice", "30"])])
        );
    }

    #[test]
    fn test_header_only() {
        let data = run("name,age\n", Options::new().headings(true));
        assert_eq!(data, Node::Indexed(Vec::new()));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(run("", Options::new()), Node::Indexed(Vec::new()));
        assert_eq!(run("", Options::new().headings(true)), Node::Indexed(Vec::new()));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let data = run("a,b\n1,2,3\n", Options::new().headings(true));
        assert_eq!(data, Node::Indexed(vec![row(&[("a", "1"), ("b", "2")])]));
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let data = run("a,b,c\n1\n", Options::new().headings(true));
        let first = data.at(0).unwrap();
        assert_eq!(first, &row(&[("a", "1")]));
        assert!(first.get("b").is_none());
        assert!(first.get("c").is_none());
    }

    #[test]
    fn test_duplicate_header_keeps_later_value() {
        let data = run("a,b,a\n1,2,3\n", Options::new().headings(true));
        let keys: Vec<_> = data.at(0).unwrap().as_keyed().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(data.at(0).unwrap().get("a"), Some(&Node::leaf("3")));
    }

    #[test]
    fn test_enclosed_fields() {
        let data = run(
            "\"last, first\",\"say \"\"hi\"\"\"\n",
            Options::new(),
        );
        assert_eq!(data, Node::Indexed(vec![fields(&["last, first", "say \"hi\""])]));
    }

    #[test]
    fn test_custom_delimiter_and_enclosure() {
        let data = run("x;'y;z'\n", Options::new().delimiter(b';').enclosure(b'\''));
        assert_eq!(data, Node::Indexed(vec![fields(&["x", "y;z"])]));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let data = run("a\n\n\nb\n", Options::new());
        assert_eq!(data, Node::Indexed(vec![fields(&["a"]), fields(&["b"])]));
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let data = run("a,b\r\n1,2", Options::new().headings(true));
        assert_eq!(data, Node::Indexed(vec![row(&[("a", "1"), ("b", "2")])]));
    }

    #[test]
    fn test_fields_are_not_trimmed() {
        let data = run(" a , b \n", Options::new());
        assert_eq!(data, Node::Indexed(vec![fields(&[" a ", " b "])]));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let config = CsvConfig::default();
        let bytes: &[u8] = b"caf\xE9\n";
        let data = read_rows(&mut config.reader(bytes), false).unwrap();
        assert_eq!(data, Node::Indexed(vec![fields(&["caf\u{FFFD}"])]));
    }
}
