use std::sync::Arc;

use crate::models::{Node, Title};
use crate::parsing::{buffer::Buffer, env::Environment, source::LineView};

use super::ParsingUnit;

/// A title line and its underline. The text is the single line left in the
/// buffer when the underline was seen.
#[derive(Debug, Clone)]
pub struct TitleUnit {
    marker: char,
}

impl TitleUnit {
    pub fn new(marker: char) -> Self {
        Self { marker }
    }
}

impl ParsingUnit for TitleUnit {
    /// Titles are complete as soon as the underline is read.
    fn accept(&mut self, _line: &LineView<'_>, _buffer: &mut Buffer) -> bool {
        false
    }

    fn finish(&mut self, buffer: &Buffer, env: &mut Environment) -> Node {
        let text = buffer.joined_text();
        let level = env.title_level(self.marker);
        let text = env.inline(&text);
        let id = env.unique_id(&text.plain_text());
        Node::Title(Arc::new(Title {
            level,
            marker: self.marker,
            text,
            id,
        }))
    }
}
