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

//! Integration tests for parsable-xml.
//!
//! Drives the reducer end to end: files on disk through `XmlFileParser`,
//! in-memory documents through `reduce_str`, and recorded event streams.

use parsable_core::{IndexMap, Key, Node, OpenError, Options, ParsableFile, ParseError};
use parsable_test::{fixtures, RecordingSource, XmlEvent};
use parsable_xml::{reduce_str, XmlConfig, XmlFileParser};
use proptest::prelude::*;

fn reduce_with(xml: &str, options: Options) -> Node {
    reduce_str(xml, &XmlConfig::default().resolve(&options)).unwrap()
}

fn leaf(node: Option<&Node>) -> Option<&str> {
    node.and_then(Node::as_leaf)
}

// =============================================================================
// Files on disk
// =============================================================================

#[test]
fn test_news_items_by_path() {
    let (_dir, path) = fixtures::write_temp("news.xml", fixtures::NEWS_XML);
    let mut parser =
        XmlFileParser::open_path(&path, &Options::new().path("rss.channel.item")).unwrap();
    assert_eq!(parser.encoding(), Some("us-ascii"));

    let titles: Vec<_> = parser
        .cursor()
        .unwrap()
        .map(|(key, item)| (key, leaf(item.get("title")).map(str::to_string)))
        .collect();
    assert_eq!(
        titles,
        vec![
            (Key::Index(0), Some("A".to_string())),
            (Key::Index(1), Some("B".to_string())),
        ]
    );

    let first = parser.data().unwrap().at(0).unwrap();
    assert_eq!(leaf(first.get("link")), Some("https://news.example.com/a"));
    // The channel's own title and link sit outside the destination.
    assert_eq!(first.as_keyed().unwrap().len(), 2);
}

#[test]
fn test_news_without_options_mirrors_nesting() {
    let (_dir, path) = fixtures::write_temp("news.xml", fixtures::NEWS_XML);
    let mut parser = XmlFileParser::open_path(&path, &Options::new()).unwrap();
    let data = parser.data().unwrap();

    let channel = data.get("rss").and_then(|rss| rss.get("channel")).unwrap();
    assert_eq!(leaf(channel.get("title")), Some("Daily News"));
    // Repeated <item> siblings overwrite one another.
    assert_eq!(leaf(channel.get("item").and_then(|i| i.get("title"))), Some("B"));
    let keys: Vec<_> = channel.as_keyed().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["title", "link", "item"]);
}

#[test]
fn test_catalog_products_by_tag_with_attributes() {
    let (_dir, path) = fixtures::write_temp("catalog.xml", fixtures::CATALOG_XML);
    let options = Options::new().tag("product").complex_parsing(true);
    let mut parser = XmlFileParser::open_path(&path, &options).unwrap();

    let ids: Vec<_> = parser
        .cursor()
        .unwrap()
        .map(|(_, product)| {
            let (tag, _, attributes) = product.as_complex().unwrap();
            assert_eq!(tag, "product");
            attributes.get("id").cloned().unwrap()
        })
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn test_catalog_products_by_path() {
    // The music product sits under <group>, outside the chain.
    let data = reduce_with(fixtures::CATALOG_XML, Options::new().path("catalog.section.product"));
    assert_eq!(data.len(), 2);
    assert_eq!(leaf(data.at(1).unwrap().get("name")), Some("Bread & Roses"));
    assert_eq!(leaf(data.at(1).unwrap().get("price")), Some("12.50"));
}

#[test]
fn test_complex_attributes_reflect_element() {
    let data = reduce_with(fixtures::CATALOG_XML, Options::new().complex_parsing(true));
    let (tag, value, attributes) = data.at(0).unwrap().as_complex().unwrap();
    assert_eq!(tag, "catalog");
    assert!(attributes.is_empty());

    let (_, _, section) = value.at(0).unwrap().as_complex().unwrap();
    let expected: IndexMap<String, String> =
        [("name".to_string(), "books".to_string())].into_iter().collect();
    assert_eq!(section, &expected);
}

#[test]
fn test_malformed_samples_fail() {
    for (name, xml) in fixtures::malformed_xml_samples() {
        let (_dir, path) = fixtures::write_temp("bad.xml", xml);
        let mut parser = XmlFileParser::open_path(&path, &Options::new()).unwrap();
        let result = parser.parse();
        assert!(
            matches!(result, Err(ParseError::Xml { .. })),
            "{name} should fail with an XML error"
        );
    }
}

#[test]
fn test_open_error_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let err = XmlFileParser::open_path(dir.path().join("nope.xml"), &Options::new()).unwrap_err();
    assert!(matches!(err, OpenError::NotFound { .. }));
}

// =============================================================================
// Recorded event streams
// =============================================================================

#[test]
fn test_data_is_reduced_once() {
    let source = RecordingSource::from_events([
        XmlEvent::start("a"),
        XmlEvent::text("1"),
        XmlEvent::end("a"),
    ]);
    let counter = source.counter();
    let mut parser = XmlFileParser::from_source(source, &Options::new());

    let first = parser.data().unwrap().clone();
    let pulls = counter.pulls();
    assert_eq!(counter.events(), 3);

    let second = parser.data().unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(counter.pulls(), pulls);
    assert_eq!(parser.cursor().unwrap().count(), 1);
    assert_eq!(counter.pulls(), pulls);
}

#[test]
fn test_path_navigation_reads_every_branch() {
    let source = RecordingSource::from_events([
        XmlEvent::start("list"),
        XmlEvent::start("v"),
        XmlEvent::text("1"),
        XmlEvent::end("v"),
        XmlEvent::end("list"),
        XmlEvent::start("list"),
        XmlEvent::start("v"),
        XmlEvent::text("2"),
        XmlEvent::end("v"),
        XmlEvent::end("list"),
    ]);
    let counter = source.counter();
    let mut parser = XmlFileParser::from_source(source, &Options::new().path("list.v"));
    assert_eq!(
        parser.data().unwrap(),
        &Node::Indexed(vec![Node::leaf("1"), Node::leaf("2")])
    );
    assert_eq!(counter.events(), 10);
}

#[test]
fn test_truncated_stream_is_not_exposed() {
    let source = RecordingSource::from_events([
        XmlEvent::start("rss"),
        XmlEvent::start("channel"),
        XmlEvent::start("item"),
        XmlEvent::text("A"),
        XmlEvent::end("item"),
    ]);
    let mut parser = XmlFileParser::from_source(source, &Options::new().path("rss.channel.item"));
    assert!(matches!(parser.data(), Err(ParseError::UnexpectedEnd)));
    assert!(parser.cursor().is_err());
}

#[test]
fn test_truncated_file_fails() {
    let (_dir, path) = fixtures::write_temp("cut.xml", "<rss><channel><item><title>A</title></item><item><title>B");
    let mut parser =
        XmlFileParser::open_path(&path, &Options::new().path("rss.channel.item")).unwrap();
    assert!(matches!(parser.data(), Err(ParseError::Xml { .. })));
}

// =============================================================================
// Properties
// =============================================================================

fn arb_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d"]), 1..12)
        .prop_map(|names| names.into_iter().map(str::to_string).collect())
}

proptest! {
    /// Repeated sibling names keep their first position and their last value.
    #[test]
    fn prop_keyed_siblings_overwrite(names in arb_names()) {
        let body: String = names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("<{name}>{i}</{name}>"))
            .collect();
        let data = reduce_with(&format!("<r>{body}</r>"), Options::new());

        let mut expected: IndexMap<String, Node> = IndexMap::new();
        for (i, name) in names.iter().enumerate() {
            expected.insert(name.clone(), Node::leaf(i.to_string()));
        }
        let fields = data.get("r").and_then(Node::as_keyed).unwrap();
        prop_assert!(fields.keys().eq(expected.keys()));
        prop_assert_eq!(fields, &expected);
    }

    /// With a tag, exactly the tagged elements come back, in document order.
    #[test]
    fn prop_tag_keeps_only_tagged(names in arb_names()) {
        let body: String = names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("<g><{name}>{i}</{name}></g>"))
            .collect();
        let data = reduce_with(&format!("<r>{body}</r>"), Options::new().tag("a"));

        let expected: Vec<Node> = names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.as_str() == "a")
            .map(|(i, _)| Node::leaf(i.to_string()))
            .collect();
        prop_assert_eq!(data, Node::Indexed(expected));
    }
}
