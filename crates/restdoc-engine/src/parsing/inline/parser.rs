use super::{
    cursor::Cursor,
    kinds::{Emphasis, Interpreted, Literal, Reference, Strong},
    types::{Inline, InlineNode},
};

/// Parses inline markup into an [`Inline`] sequence.
///
/// Text between constructs is emitted as `InlineNode::Text`; unclosed
/// constructs stay part of the surrounding text.
pub fn parse_inline(s: &str) -> Inline {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = 0;

    fn flush_text(out: &mut Vec<InlineNode>, s: &str, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text {
                text: s[start..end].to_string(),
            });
        }
    }

    while !cur.eof() {
        let start = cur.pos();

        let node = try_parse_literal(&mut cur)
            .or_else(|| try_parse_strong(&mut cur))
            .or_else(|| try_parse_emphasis(&mut cur))
            .or_else(|| try_parse_role(&mut cur))
            .or_else(|| try_parse_interpreted(&mut cur));
        if let Some(node) = node {
            flush_text(&mut out, s, text_start, start);
            out.push(node);
            text_start = cur.pos();
            continue;
        }

        if let Some((word_start, node)) = try_parse_named_reference(&mut cur, text_start) {
            flush_text(&mut out, s, text_start, word_start);
            out.push(node);
            text_start = cur.pos();
            continue;
        }

        cur.bump();
    }

    flush_text(&mut out, s, text_start, cur.pos());
    Inline(out)
}

/// Matches `open ... close` at the cursor and returns the inner byte range.
///
/// The opener must sit at a markup start and be followed by non-whitespace;
/// the closer must follow non-whitespace. On failure the cursor is restored.
fn try_parse_delimited(cur: &mut Cursor<'_>, open: &[u8], close: &[u8]) -> Option<(usize, usize)> {
    if !cur.starts_with(open) || !cur.at_markup_start() {
        return None;
    }

    let saved = cur.clone();
    cur.bump_n(open.len());
    if cur.peek().is_none_or(|b| b.is_ascii_whitespace()) {
        *cur = saved;
        return None;
    }

    let inner_start = cur.pos();
    while !cur.eof() {
        if cur.starts_with(close)
            && cur.pos() > inner_start
            && !cur.prev().is_some_and(|b| b.is_ascii_whitespace())
        {
            let inner_end = cur.pos();
            cur.bump_n(close.len());
            return Some((inner_start, inner_end));
        }
        cur.bump();
    }

    *cur = saved;
    None
}

fn try_parse_literal(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let (start, end) = try_parse_delimited(cur, Literal::MARK, Literal::MARK)?;
    Some(InlineNode::Literal {
        text: cur.s[start..end].to_string(),
    })
}

fn try_parse_strong(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let (start, end) = try_parse_delimited(cur, Strong::MARK, Strong::MARK)?;
    Some(InlineNode::Strong {
        text: cur.s[start..end].to_string(),
    })
}

fn try_parse_emphasis(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let (start, end) = try_parse_delimited(cur, Emphasis::MARK, Emphasis::MARK)?;
    Some(InlineNode::Emphasis {
        text: cur.s[start..end].to_string(),
    })
}

/// `:role:`text``
fn try_parse_role(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(Interpreted::ROLE_MARK) || !cur.at_markup_start() {
        return None;
    }

    let saved = cur.clone();
    cur.bump();
    let role_start = cur.pos();
    while let Some(b) = cur.peek() {
        if b == Interpreted::ROLE_MARK && cur.s.as_bytes().get(cur.pos() + 1) == Some(&b'`') {
            break;
        }
        if !Interpreted::is_role_byte(b) {
            *cur = saved;
            return None;
        }
        cur.bump();
    }
    let role_end = cur.pos();
    if cur.eof() || role_end == role_start {
        *cur = saved;
        return None;
    }
    cur.bump(); // closing `:`

    match try_parse_delimited(cur, Interpreted::TICK, Interpreted::TICK) {
        Some((start, end)) => Some(InlineNode::Role {
            role: cur.s[role_start..role_end].to_string(),
            text: cur.s[start..end].to_string(),
        }),
        None => {
            *cur = saved;
            None
        }
    }
}

/// `` `text` ``, `` `text`_ `` and `` `text`__ ``
fn try_parse_interpreted(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let (start, end) = try_parse_delimited(cur, Interpreted::TICK, Interpreted::TICK)?;
    let inner = &cur.s[start..end];

    let anonymous = if cur.starts_with(Reference::ANONYMOUS_SUFFIX) {
        cur.bump_n(Reference::ANONYMOUS_SUFFIX.len());
        true
    } else if cur.peek() == Some(Reference::SUFFIX) {
        cur.bump();
        false
    } else {
        return Some(InlineNode::Role {
            role: Interpreted::DEFAULT_ROLE.to_string(),
            text: inner.to_string(),
        });
    };

    let (text, url) = Reference::split_embedded(inner);
    Some(InlineNode::Reference {
        text,
        url,
        anonymous,
    })
}

/// A bare `name_` or `name__` reference ending at the cursor's underscore.
///
/// Returns the byte offset where the name starts so the caller can cut the
/// preceding text there.
fn try_parse_named_reference(
    cur: &mut Cursor<'_>,
    text_start: usize,
) -> Option<(usize, InlineNode)> {
    if cur.peek() != Some(Reference::SUFFIX) {
        return None;
    }
    let bytes = cur.s.as_bytes();
    let end = cur.pos();

    let mut word_start = end;
    while word_start > text_start && Reference::is_name_byte(bytes[word_start - 1]) {
        word_start -= 1;
    }
    if word_start == end || !bytes[word_start].is_ascii_alphanumeric() {
        return None;
    }
    if word_start > 0 && !matches!(bytes[word_start - 1], b' ' | b'\t' | b'\n' | b'(' | b'"' | b'\'') {
        return None;
    }

    let anonymous = cur.starts_with(Reference::ANONYMOUS_SUFFIX);
    let suffix_len = if anonymous { 2 } else { 1 };
    if bytes
        .get(end + suffix_len)
        .is_some_and(|b| b.is_ascii_alphanumeric() || *b == Reference::SUFFIX)
    {
        return None;
    }

    cur.bump_n(suffix_len);
    Some((
        word_start,
        InlineNode::Reference {
            text: cur.s[word_start..end].to_string(),
            url: None,
            anonymous,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> InlineNode {
        InlineNode::Text {
            text: s.to_string(),
        }
    }

    #[test]
    fn parse_simple_text() {
        assert_eq!(parse_inline("hello world").0, vec![text("hello world")]);
    }

    #[test]
    fn parse_emphasis_and_strong() {
        let inline = parse_inline("a *b* and **c**");
        assert_eq!(
            inline.0,
            vec![
                text("a "),
                InlineNode::Emphasis {
                    text: "b".to_string()
                },
                text(" and "),
                InlineNode::Strong {
                    text: "c".to_string()
                },
            ]
        );
    }

    #[test]
    fn literal_suppresses_other_markup() {
        let inline = parse_inline("``*not emphasis*``");
        assert_eq!(
            inline.0,
            vec![InlineNode::Literal {
                text: "*not emphasis*".to_string()
            }]
        );
    }

    #[test]
    fn parse_role() {
        let inline = parse_inline(":ref:`intro`");
        assert_eq!(
            inline.0,
            vec![InlineNode::Role {
                role: "ref".to_string(),
                text: "intro".to_string()
            }]
        );
    }

    #[test]
    fn interpreted_text_gets_default_role() {
        let inline = parse_inline("`Dune`");
        assert_eq!(
            inline.0,
            vec![InlineNode::Role {
                role: "title-reference".to_string(),
                text: "Dune".to_string()
            }]
        );
    }

    #[test]
    fn embedded_url_reference() {
        let inline = parse_inline("see `Rust <https://rust-lang.org>`_ now");
        assert_eq!(
            inline.0,
            vec![
                text("see "),
                InlineNode::Reference {
                    text: "Rust".to_string(),
                    url: Some("https://rust-lang.org".to_string()),
                    anonymous: false,
                },
                text(" now"),
            ]
        );
        assert_eq!(
            inline.embedded_targets().collect::<Vec<_>>(),
            vec![("Rust", "https://rust-lang.org")]
        );
    }

    #[test]
    fn anonymous_reference() {
        let inline = parse_inline("`here`__");
        assert_eq!(
            inline.0,
            vec![InlineNode::Reference {
                text: "here".to_string(),
                url: None,
                anonymous: true,
            }]
        );
    }

    #[test]
    fn bare_named_reference() {
        let inline = parse_inline("read docutils_ first");
        assert_eq!(
            inline.0,
            vec![
                text("read "),
                InlineNode::Reference {
                    text: "docutils".to_string(),
                    url: None,
                    anonymous: false,
                },
                text(" first"),
            ]
        );
    }

    #[test]
    fn snake_case_is_not_a_reference() {
        assert_eq!(parse_inline("snake_case").0, vec![text("snake_case")]);
        assert_eq!(parse_inline("__init__").0, vec![text("__init__")]);
    }

    #[test]
    fn unclosed_constructs_become_text() {
        let inline = parse_inline("*open and ``also open");
        assert_eq!(inline.0, vec![text("*open and ``also open")]);
    }

    #[test]
    fn asterisk_inside_word_is_text() {
        assert_eq!(parse_inline("2*3*4").0, vec![text("2*3*4")]);
    }

    #[test]
    fn plain_text_strips_markup() {
        assert_eq!(
            parse_inline("The **bold** `move <x>`_").plain_text(),
            "The bold move"
        );
    }

    #[test]
    fn non_ascii_text_survives() {
        assert_eq!(
            parse_inline("café *crème*").plain_text(),
            "café crème"
        );
    }
}
