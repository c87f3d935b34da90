use crate::models::{Block, Code, Node};
use crate::parsing::{buffer::Buffer, classify, env::Environment, source::LineView};

use super::{ParsingUnit, dedent};

/// Indented region kept as raw lines.
#[derive(Debug, Clone, Default)]
pub struct BlockUnit;

/// Indented region after a `::` marker or a literal-body directive.
#[derive(Debug, Clone, Default)]
pub struct CodeUnit;

fn accept_indented(line: &LineView<'_>, buffer: &mut Buffer) -> bool {
    if !classify::is_block_line(line.text) {
        return false;
    }
    buffer.push(line.text);
    true
}

impl ParsingUnit for BlockUnit {
    fn accept(&mut self, line: &LineView<'_>, buffer: &mut Buffer) -> bool {
        accept_indented(line, buffer)
    }

    fn finish(&mut self, buffer: &Buffer, _env: &mut Environment) -> Node {
        Node::Block(Block {
            lines: dedent(buffer.lines()),
        })
    }
}

impl ParsingUnit for CodeUnit {
    fn accept(&mut self, line: &LineView<'_>, buffer: &mut Buffer) -> bool {
        accept_indented(line, buffer)
    }

    fn finish(&mut self, buffer: &Buffer, _env: &mut Environment) -> Node {
        Node::Code(Code {
            language: None,
            lines: dedent(buffer.lines()),
        })
    }
}
