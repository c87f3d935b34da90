//! Include expansion seen through the full parser.

use pretty_assertions::assert_eq;

use super::outline_of;
use crate::io::FsOrigin;
use crate::parsing::{ParseError, Parser};
use crate::tests::{create_test_dir, create_test_file};

#[test]
fn included_text_joins_the_document() {
    let dir = create_test_dir();
    create_test_file(&dir, "intro.rst", "Intro\n=====\n\nWelcome.\n");
    let parser = Parser::new().with_origin(FsOrigin::new(dir.path()));

    let parsed = parser
        .parse(".. include:: intro.rst\n\nOutro\n=====\n")
        .unwrap();
    assert_eq!(
        outline_of(&parsed),
        "section h1 #intro \"Intro\"\n  paragraph \"Welcome.\"\nend #intro\nsection h1 #outro \"Outro\"\nend #outro\n"
    );
}

#[test]
fn parse_file_resolves_includes_next_to_the_file() {
    let dir = create_test_dir();
    create_test_file(&dir, "guide/index.rst", "Start\n\n.. include:: parts/body.rst\n");
    create_test_file(&dir, "guide/parts/body.rst", ".. include:: ../tail.rst\n");
    create_test_file(&dir, "guide/tail.rst", "Tail text.");
    let parser = Parser::new().with_origin(FsOrigin::new(dir.path()));

    let parsed = parser.parse_file("guide/index.rst").unwrap();
    assert_eq!(
        outline_of(&parsed),
        "paragraph \"Start\"\nparagraph \"Tail text.\"\n"
    );
}

#[test]
fn rooted_target_resolves_against_origin_root() {
    let dir = create_test_dir();
    create_test_file(&dir, "guide/index.rst", ".. include:: /shared.rst\n");
    create_test_file(&dir, "shared.rst", "Shared.");
    let parser = Parser::new().with_origin(FsOrigin::new(dir.path()));

    let parsed = parser.parse_file("guide/index.rst").unwrap();
    assert_eq!(outline_of(&parsed), "paragraph \"Shared.\"\n");
}

#[test]
fn byte_order_mark_in_included_file_is_dropped() {
    let dir = create_test_dir();
    create_test_file(&dir, "bom.rst", "\u{feff}Marked.");
    let parser = Parser::new().with_origin(FsOrigin::new(dir.path()));

    let parsed = parser.parse(".. include:: bom.rst\n").unwrap();
    assert_eq!(outline_of(&parsed), "paragraph \"Marked.\"\n");
}

#[test]
fn missing_include_aborts_the_parse() {
    let dir = create_test_dir();
    let parser = Parser::new().with_origin(FsOrigin::new(dir.path()));

    let err = parser.parse("Text\n\n.. include:: nowhere.rst\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::IncludeNotFound { ref target, .. } if target == "nowhere.rst"
    ));
}

#[test]
fn include_cycle_aborts_the_parse() {
    let dir = create_test_dir();
    create_test_file(&dir, "a.rst", ".. include:: b.rst\n");
    create_test_file(&dir, "b.rst", ".. include:: a.rst\n");
    let parser = Parser::new().with_origin(FsOrigin::new(dir.path()));

    let err = parser.parse_file("a.rst").unwrap_err();
    assert_eq!(err.to_string(), "include cycle: a.rst -> b.rst -> a.rst");
}

#[test]
fn parse_file_reports_missing_file() {
    let dir = create_test_dir();
    let parser = Parser::new().with_origin(FsOrigin::new(dir.path()));

    assert!(matches!(
        parser.parse_file("absent.rst"),
        Err(ParseError::Read { .. })
    ));
}

#[test]
fn diagnostics_name_the_file() {
    let dir = create_test_dir();
    create_test_file(&dir, "index.rst", ".. bogus::\n");
    let parser = Parser::new().with_origin(FsOrigin::new(dir.path()));

    let parsed = parser.parse_file("index.rst").unwrap();
    assert_eq!(
        parsed.diagnostics[0].message,
        "Unknown directive \"bogus\" in \"index.rst\" for line \".. bogus::\""
    );
}
