use restdoc_engine::parsing::{Parser, parse_document, snapshot};
use restdoc_engine::{
    Directive, DirectiveContext, DirectiveError, DirectiveOptions, Node, ParseOptions,
};

#[test]
fn fixture_manual() {
    assert_fixture("manual");
}

fn assert_fixture(name: &str) {
    let rst = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.rst",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();

    let parsed = parse_document(&rst).unwrap();
    snapshot::invariants(&parsed.document);
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);

    let outline = snapshot::normalize(&parsed.document);
    insta::assert_snapshot!(name, outline);
}

/// Links declared anywhere in the document are returned with the result
#[test]
fn links_are_collected() {
    let rst = std::fs::read_to_string(format!(
        "{}/tests/fixtures/manual.rst",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();

    let parsed = parse_document(&rst).unwrap();
    assert_eq!(
        parsed.links.get("home").map(String::as_str),
        Some("https://example.org")
    );
}

/// Titles come back in document order with their levels
#[test]
fn titles_in_document_order() {
    let parsed = parse_document("A\n===\n\nB\n---\n\nC\n===\n").unwrap();
    let titles: Vec<_> = parsed
        .document
        .titles()
        .map(|t| (t.id.as_str(), t.level))
        .collect();
    assert_eq!(titles, vec![("a", 1), ("b", 2), ("c", 1)]);
}

struct Shout;

impl Directive for Shout {
    fn name(&self) -> &str {
        "shout"
    }

    fn process(
        &self,
        ctx: &mut DirectiveContext<'_>,
        _body: Option<Node>,
        variable: &str,
        _data: &[String],
        _options: &DirectiveOptions,
    ) -> Result<(), DirectiveError> {
        if variable.is_empty() {
            return Err(DirectiveError::Custom("nothing to shout".to_string()));
        }
        let loud = ctx.inline(&variable.to_uppercase());
        ctx.push(Node::Paragraph(loud));
        Ok(())
    }
}

/// Directives can be added from outside the crate
#[test]
fn external_directive() {
    let mut parser = Parser::new();
    parser.register(Shout);

    let parsed = parser.parse(".. shout:: hello\n\n.. shout::\n").unwrap();
    assert_eq!(snapshot::normalize(&parsed.document), "paragraph \"HELLO\"\n");
    assert_eq!(parsed.diagnostics.len(), 1);
    assert_eq!(
        parsed.diagnostics[0].to_string(),
        "line 3: Error while processing \"shout\" directive in \"<input>\": nothing to shout"
    );
}

/// Deeper starting level shifts every title
#[test]
fn options_shift_title_levels() {
    let parser = Parser::new().with_options(ParseOptions {
        initial_header_level: 2,
        ..ParseOptions::default()
    });
    let parsed = parser.parse("Top\n===\n").unwrap();
    assert_eq!(parsed.document.titles().next().map(|t| t.level), Some(2));
}
