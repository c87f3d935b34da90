//! Pure line classifiers consulted by the state machine.
//!
//! Each function looks at one line (and sometimes the line after it) and never
//! at parser state, except for the literal flag threaded in by the caller.

use std::sync::LazyLock;

use regex::Regex;

static LIST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)([-*+•]|\d+[.)]|#[.)]|[a-zA-Z][.)]|\(\d+\)|\([a-zA-Z#]\))\s+(.*)$")
        .expect("valid list regex")
});

static DIRECTIVE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.\.\s+(\S+?)::(?:\s+(.*?))?\s*$").expect("valid directive regex")
});

static QUOTED_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.\.\s+_`([^`]+)`:(?:\s+(.*?))?\s*$").expect("valid link regex"));

static NAMED_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.\.\s+_([^:`\s][^:]*):(?:\s+(.*?))?\s*$").expect("valid link regex"));

static ANONYMOUS_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^__\s+(\S.*?)\s*$").expect("valid link regex"));

static FIELD_OPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s+:([^:\s][^:]*):(?:\s+(.*?))?\s*$").expect("valid option regex")
});

static PLAIN_OPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s+([A-Za-z][\w-]*):\s+(.*?)\s*$").expect("valid option regex")
});

/// Characters that may form a section underline or transition.
pub const UNDERLINE_CHARS: &[char] = &[
    '=', '-', '~', '*', '+', '^', '"', '.', '`', '\'', '_', '#', ':',
];

/// A parsed `.. name:: variable` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveHeader {
    pub name: String,
    /// Everything after `::`, trimmed; empty when absent.
    pub variable: String,
}

/// A hyperlink target line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// `.. _name: url`
    Named { name: String, url: String },
    /// `__ url` or `.. __: url`
    Anonymous { url: String },
    /// `.. _name:` with nothing after it.
    Anchor { name: String },
}

/// The first line of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSeparator {
    /// `=====  =====`
    Simple { columns: usize },
    /// `+-----+-----+` (or `+=====+`)
    Grid { columns: usize },
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub fn is_indented(text: &str) -> bool {
    text.starts_with([' ', '\t'])
}

/// Bullet or enumerated list item. With `literal` set only unindented items
/// count, so indented literal content is not mistaken for a list.
pub fn is_list_line(text: &str, literal: bool) -> bool {
    match LIST_LINE.captures(text) {
        Some(caps) => !literal || caps[1].is_empty(),
        None => false,
    }
}

/// Splits a list line into `(indent, marker, text)`.
pub fn split_list_line(text: &str) -> Option<(usize, &str, &str)> {
    let caps = LIST_LINE.captures(text)?;
    let indent = caps.get(1)?.as_str().chars().count();
    Some((indent, caps.get(2)?.as_str(), caps.get(3)?.as_str()))
}

/// Indented or blank.
pub fn is_block_line(text: &str) -> bool {
    is_indented(text) || is_blank(text)
}

/// A section underline: three or more copies of one underline character.
/// Returns the character.
pub fn special_line(text: &str) -> Option<char> {
    let text = text.trim_end();
    let mut chars = text.chars();
    let first = chars.next()?;
    if !UNDERLINE_CHARS.contains(&first) || text.chars().count() < 3 {
        return None;
    }
    chars.all(|c| c == first).then_some(first)
}

pub fn is_directive(text: &str) -> bool {
    DIRECTIVE_HEADER.is_match(text)
}

pub fn parse_directive(text: &str) -> Option<DirectiveHeader> {
    let caps = DIRECTIVE_HEADER.captures(text)?;
    Some(DirectiveHeader {
        name: caps[1].to_string(),
        variable: caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
    })
}

/// `..` alone or `.. ` followed by anything. Callers test directive headers
/// and link targets first.
pub fn is_comment(text: &str) -> bool {
    text.trim_end() == ".." || text.starts_with(".. ")
}

pub fn parse_link(text: &str) -> Option<LinkTarget> {
    if let Some(caps) = ANONYMOUS_LINK.captures(text) {
        return Some(LinkTarget::Anonymous {
            url: caps[1].to_string(),
        });
    }

    let caps = QUOTED_LINK
        .captures(text)
        .or_else(|| NAMED_LINK.captures(text))?;
    let name = caps[1].trim().to_string();
    let url = caps
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Some(match (name.as_str(), url.is_empty()) {
        ("_", false) => LinkTarget::Anonymous { url },
        (_, true) => LinkTarget::Anchor { name },
        (_, false) => LinkTarget::Named { name, url },
    })
}

/// Lookahead test on the line *after* a candidate term.
pub fn is_definition_list(next: &str) -> bool {
    is_indented(next) && !is_blank(next)
}

pub fn parse_table_separator(text: &str) -> Option<TableSeparator> {
    let text = text.trim_end();
    if text.starts_with('+') && text.ends_with('+') && text.len() > 2 {
        let dashes = text.chars().all(|c| matches!(c, '+' | '-' | '='));
        let columns = text.matches('+').count() - 1;
        return (dashes && columns >= 1 && !text.contains("++"))
            .then_some(TableSeparator::Grid { columns });
    }

    if text.is_empty() || !text.chars().all(|c| c == '=' || c == ' ') {
        return None;
    }
    let columns = text.split(' ').filter(|run| !run.is_empty()).count();
    (columns >= 2 && !text.starts_with(' ')).then_some(TableSeparator::Simple { columns })
}

/// `:name: value`, `:flag:` or `name: value`, indented.
pub fn parse_directive_option(text: &str) -> Option<(String, String)> {
    let caps = FIELD_OPTION
        .captures(text)
        .or_else(|| PLAIN_OPTION.captures(text))?;
    let value = caps
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    Some((caps[1].trim().to_string(), value))
}
