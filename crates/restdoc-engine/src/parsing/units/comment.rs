use crate::models::{Comment, Node};
use crate::parsing::{buffer::Buffer, classify, env::Environment, source::LineView};

use super::{ParsingUnit, dedent};

/// `.. text` comments. Keeps its own lines so that a comment the state
/// machine abandons leaves nothing behind in the buffer.
#[derive(Debug, Clone)]
pub struct CommentUnit {
    first: Option<String>,
    body: Vec<String>,
}

impl CommentUnit {
    /// Starts a comment from its marker line.
    pub fn new(first_line: &str) -> Self {
        let text = first_line.trim_start_matches("..").trim();
        Self {
            first: (!text.is_empty()).then(|| text.to_string()),
            body: Vec::new(),
        }
    }
}

impl ParsingUnit for CommentUnit {
    fn accept(&mut self, line: &LineView<'_>, _buffer: &mut Buffer) -> bool {
        let text = line.text;
        if classify::is_block_line(text) {
            self.body.push(text.to_string());
            return true;
        }
        if classify::is_comment(text)
            && !classify::is_directive(text)
            && classify::parse_link(text).is_none()
        {
            self.body
                .push(text.trim_start_matches("..").trim().to_string());
            return true;
        }
        false
    }

    fn finish(&mut self, _buffer: &Buffer, _env: &mut Environment) -> Node {
        let body = dedent(&self.body);
        let lines = self
            .first
            .take()
            .into_iter()
            .chain(body.into_iter().skip_while(|line| line.is_empty()))
            .collect();
        Node::Comment(Comment { lines })
    }
}
