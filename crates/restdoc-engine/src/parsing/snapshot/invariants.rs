use std::sync::Arc;

use crate::models::{Document, Node, Title};

/// Panics unless every `SectionBegin` is matched by exactly one later
/// `SectionEnd` for the same title, and open section levels increase from
/// the outermost section inward.
pub fn check(document: &Document) {
    let mut open: Vec<&Arc<Title>> = Vec::new();
    for (index, node) in document.nodes().iter().enumerate() {
        match node {
            Node::SectionBegin(title) => {
                if let Some(parent) = open.last() {
                    assert!(
                        parent.level < title.level,
                        "section {:?} (level {}) opened inside {:?} (level {}) at node {index}",
                        title.id,
                        title.level,
                        parent.id,
                        parent.level
                    );
                }
                open.push(title);
            }
            Node::SectionEnd(title) => {
                let position = open.iter().position(|t| Arc::ptr_eq(t, title));
                match position {
                    Some(position) => {
                        open.remove(position);
                    }
                    None => panic!("section end for {:?} at node {index} was never opened", title.id),
                }
            }
            Node::Title(title) => panic!("bare title {:?} at node {index}", title.id),
            _ => {}
        }
    }
    assert!(
        open.is_empty(),
        "sections left open: {:?}",
        open.iter().map(|t| t.id.as_str()).collect::<Vec<_>>()
    );
}
