use crate::models::{List, ListItem, Node};
use crate::parsing::{buffer::Buffer, classify, env::Environment, source::LineView};

use super::ParsingUnit;

const BULLETS: &[&str] = &["-", "*", "+", "•"];

/// Bullet and enumerated lists, flattened into items that remember their
/// indentation.
///
/// An item at the first item's indentation with a different bullet, or an
/// enumerator after bullets (and the reverse), starts a new list.
#[derive(Debug, Clone)]
pub struct ListUnit {
    literal: bool,
    style: Option<(usize, MarkerStyle)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerStyle {
    Bullet(char),
    Enumerated,
}

impl MarkerStyle {
    fn of(marker: &str) -> Self {
        match marker.chars().next() {
            Some(c) if BULLETS.contains(&marker) => MarkerStyle::Bullet(c),
            _ => MarkerStyle::Enumerated,
        }
    }
}

impl ListUnit {
    pub fn new(literal: bool) -> Self {
        Self {
            literal,
            style: None,
        }
    }

    /// Whether a list line continues this list rather than starting another.
    fn same_list(&mut self, text: &str) -> bool {
        let Some((indent, marker, _)) = classify::split_list_line(text) else {
            return true;
        };
        let style = MarkerStyle::of(marker);
        match self.style {
            None => {
                self.style = Some((indent, style));
                true
            }
            Some((first_indent, first_style)) => indent != first_indent || style == first_style,
        }
    }
}

impl ParsingUnit for ListUnit {
    fn accept(&mut self, line: &LineView<'_>, buffer: &mut Buffer) -> bool {
        let belongs = (classify::is_list_line(line.text, self.literal) && self.same_list(line.text))
            || classify::is_blank(line.text)
            || (classify::is_indented(line.text) && !buffer.is_empty());
        if belongs {
            buffer.push(line.text);
        }
        belongs
    }

    fn finish(&mut self, buffer: &Buffer, env: &mut Environment) -> Node {
        let mut items: Vec<(usize, String, Vec<&str>)> = Vec::new();
        for line in buffer.lines() {
            if classify::is_list_line(line, self.literal)
                && let Some((depth, marker, text)) = classify::split_list_line(line)
            {
                items.push((depth, marker.to_string(), vec![text]));
            } else if !classify::is_blank(line)
                && let Some((_, _, text)) = items.last_mut()
            {
                text.push(line.trim());
            }
        }

        let ordered = items
            .first()
            .is_some_and(|(_, marker, _)| MarkerStyle::of(marker) == MarkerStyle::Enumerated);
        let items = items
            .into_iter()
            .map(|(depth, marker, text)| ListItem {
                depth,
                marker,
                text: env.inline(&text.join(" ")),
            })
            .collect();

        Node::List(List { ordered, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::units::test_support::feed;
    use pretty_assertions::assert_eq;

    fn finish(lines: &[&str], literal: bool) -> (usize, List) {
        let mut unit = ListUnit::new(literal);
        let mut buffer = Buffer::new();
        let accepted = feed(&mut unit, lines, &mut buffer);
        match unit.finish(&buffer, &mut Environment::default()) {
            Node::List(list) => (accepted, list),
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn bullet_items_with_continuation() {
        let (accepted, list) = finish(&["- one", "  more", "- two", "", "After"], false);
        assert_eq!(accepted, 4);
        assert!(!list.ordered);
        let texts: Vec<_> = list.items.iter().map(|i| i.text.plain_text()).collect();
        assert_eq!(texts, vec!["one more", "two"]);
    }

    #[test]
    fn enumerated_list_is_ordered() {
        let (_, list) = finish(&["1. first", "2. second"], false);
        assert!(list.ordered);
        assert_eq!(list.items[1].marker, "2.");
    }

    #[test]
    fn nested_items_keep_depth() {
        let (_, list) = finish(&["- outer", "  - inner"], false);
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[1].depth, 2);
    }

    #[test]
    fn literal_mode_treats_indented_markers_as_continuation() {
        let (_, list) = finish(&["- outer", "  - inner"], true);
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].text.plain_text(), "outer - inner");
    }

    #[test]
    fn switching_marker_style_ends_the_list() {
        let (accepted, list) = finish(&["- a", "- b", "", "1. one"], false);
        assert_eq!(accepted, 3);
        assert_eq!(list.items.len(), 2);

        let (accepted, _) = finish(&["- a", "* b"], false);
        assert_eq!(accepted, 1);
    }

    #[test]
    fn nested_items_may_use_other_markers() {
        let (accepted, list) = finish(&["1. a", "   - b", "2. c"], false);
        assert_eq!(accepted, 3);
        assert!(list.ordered);
    }

    #[test]
    fn unindented_text_ends_the_list() {
        let (accepted, _) = finish(&["* a", "not a list"], false);
        assert_eq!(accepted, 1);
    }
}
