//! Integration tests for the parsing module.
//!
//! Fixtures (.rst) and snapshots (.snap) are co-located in `fixtures/`.
//! Snapshots hold the outline produced by `snapshot::normalize`, followed by
//! any diagnostics.

mod includes;

use crate::models::Node;
use crate::parsing::{ParsedDoc, Parser, parse_document, snapshot};

// Fixture-based snapshot tests

#[test]
fn fixture_sections() {
    assert_fixture("sections");
}

#[test]
fn fixture_blocks() {
    assert_fixture("blocks");
}

#[test]
fn fixture_tables() {
    assert_fixture("tables");
}

#[test]
fn fixture_directives() {
    assert_fixture("directives");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let rst = std::fs::read_to_string(format!("{fixtures_dir}/{name}.rst")).unwrap();

    let parsed = Parser::new().parse(&rst).unwrap();
    snapshot::invariants(&parsed.document);

    let outline = render(&parsed);
    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, outline);
    });
}

fn render(parsed: &ParsedDoc) -> String {
    let mut out = snapshot::normalize(&parsed.document);
    for diagnostic in &parsed.diagnostics {
        out.push_str(&format!("diagnostic {diagnostic}\n"));
    }
    out
}

/// Parses with the default parser, checks structural invariants and returns
/// the result.
pub(super) fn parse(text: &str) -> ParsedDoc {
    let parsed = parse_document(text).unwrap();
    snapshot::invariants(&parsed.document);
    parsed
}

pub(super) fn outline(text: &str) -> String {
    outline_of(&parse(text))
}

pub(super) fn outline_of(parsed: &ParsedDoc) -> String {
    snapshot::normalize(&parsed.document)
}

pub(super) fn kinds(nodes: &[Node]) -> Vec<&'static str> {
    nodes.iter().map(Node::kind).collect()
}
