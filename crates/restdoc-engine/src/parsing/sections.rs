use std::sync::Arc;

use log::trace;

use crate::models::{Node, Title};

/// Titles whose sections are still open, outermost first.
///
/// Levels on the stack are strictly increasing: opening a title first closes
/// every open title of the same or a deeper level.
#[derive(Debug, Default)]
pub struct SectionStack {
    open: Vec<Arc<Title>>,
}

impl SectionStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the sections `title` ends and opens its own. Returns the
    /// `SectionEnd` markers in the order their titles were opened, followed by
    /// the new `SectionBegin`.
    pub fn open(&mut self, title: Arc<Title>) -> Vec<Node> {
        let mut nodes = match self.open.iter().position(|t| t.level >= title.level) {
            Some(index) => self.close_from(index),
            None => Vec::new(),
        };
        trace!("open section {:?} at level {}", title.id, title.level);
        self.open.push(Arc::clone(&title));
        nodes.push(Node::SectionBegin(title));
        nodes
    }

    /// Closes everything still open, in the order the titles were opened.
    pub fn close_all(&mut self) -> Vec<Node> {
        self.close_from(0)
    }

    fn close_from(&mut self, index: usize) -> Vec<Node> {
        self.open
            .drain(index..)
            .inspect(|title| trace!("close section {:?}", title.id))
            .map(Node::SectionEnd)
            .collect()
    }
}
