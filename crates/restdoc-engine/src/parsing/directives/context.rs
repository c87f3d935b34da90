use crate::models::Node;
use crate::parsing::{
    driver::DocumentParser,
    env::Environment,
    inline::Inline,
    source::Lines,
};

use super::{DirectiveError, Directives};

/// What a running directive may touch: the document being built and the
/// per-document environment.
pub struct DirectiveContext<'a> {
    env: &'a mut Environment,
    directives: &'a Directives,
    nodes: &'a mut Vec<Node>,
}

impl<'a> DirectiveContext<'a> {
    pub(crate) fn new(
        env: &'a mut Environment,
        directives: &'a Directives,
        nodes: &'a mut Vec<Node>,
    ) -> Self {
        Self {
            env,
            directives,
            nodes,
        }
    }

    /// Appends a node to the document.
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn env(&self) -> &Environment {
        &*self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut *self.env
    }

    pub fn inline(&mut self, text: &str) -> Inline {
        self.env.inline(text)
    }

    /// Parses `lines` as a standalone fragment sharing this document's
    /// environment and directives.
    pub fn parse_fragment(&mut self, lines: &[String]) -> Result<Vec<Node>, DirectiveError> {
        let line = self.env.line();
        let fragment = Lines::from_fragment(lines);
        let result = DocumentParser::new(self.env, self.directives).run(&fragment);
        self.env.set_line(line);
        result.map_err(|err| DirectiveError::Fragment(Box::new(err)))
    }
}
