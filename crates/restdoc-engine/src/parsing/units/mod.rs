//! # Parsing Units
//!
//! Handlers for constructs that span several lines. The state machine creates
//! one when it enters the matching state, feeds it lines through
//! [`ParsingUnit::accept`] until it declines one, and turns it into a node with
//! [`ParsingUnit::finish`] on flush.

pub mod block;
pub mod comment;
pub mod definition_list;
pub mod list;
pub mod table;
pub mod title;

use crate::models::Node;

use super::{buffer::Buffer, env::Environment, source::LineView};

pub use block::{BlockUnit, CodeUnit};
pub use comment::CommentUnit;
pub use definition_list::DefinitionListUnit;
pub use list::ListUnit;
pub use table::TableUnit;
pub use title::TitleUnit;

pub trait ParsingUnit {
    /// Tries to extend the construct with `line`, usually by pushing it onto
    /// `buffer`. Returning `false` ends the construct; the line is then
    /// parsed again from the start state.
    fn accept(&mut self, line: &LineView<'_>, buffer: &mut Buffer) -> bool;

    /// Builds the node. Called once, on flush.
    fn finish(&mut self, buffer: &Buffer, env: &mut Environment) -> Node;
}

/// Strips the common indentation and any trailing blank lines.
pub(crate) fn dedent(lines: &[String]) -> Vec<String> {
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |i| i + 1);
    let lines = &lines[..end];

    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| line.chars().skip(indent).collect::<String>().trim_end().to_string())
        .collect()
}

/// Splits dedented lines into paragraphs at blank lines.
pub(crate) fn paragraphs(lines: &[String]) -> Vec<String> {
    lines
        .split(|line| line.trim().is_empty())
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            chunk
                .iter()
                .map(|line| line.trim())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Feeds `lines` to `unit` until it declines one; returns how many it took.
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn feed(unit: &mut impl ParsingUnit, lines: &[&str], buffer: &mut Buffer) -> usize {
        let owned: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
        let mut accepted = 0;
        for (number, text) in owned.iter().enumerate() {
            let line = LineView {
                text,
                next: owned.get(number + 1).map(String::as_str),
                following: &owned[number + 1..],
                number,
            };
            if !unit.accept(&line, buffer) {
                break;
            }
            accepted += 1;
        }
        accepted
    }
}
