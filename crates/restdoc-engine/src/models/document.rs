use serde::Serialize;
use uuid::Uuid;

use super::node::{Node, Title};

/// Namespace for content-derived document identifiers.
const DOCUMENT_NAMESPACE: Uuid = Uuid::from_u128(0x6b1f_2c4e_93a0_4d7e_8a51_0f3c_d2e9_7b14);

/// A parsed document: the ordered node sequence plus a content-derived id.
///
/// The id is a UUID v5 over the raw input text, so parsing the same text twice
/// yields the same id. Nodes are owned by value and only appended while the
/// parse that produced the document is running.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    id: Uuid,
    nodes: Vec<Node>,
}

impl Document {
    /// Creates an empty document whose id is derived from `source`.
    pub fn new(source: &str) -> Self {
        Self::from_nodes(source, Vec::new())
    }

    pub(crate) fn from_nodes(source: &str, nodes: Vec<Node>) -> Self {
        Self {
            id: Uuid::new_v5(&DOCUMENT_NAMESPACE, source.as_bytes()),
            nodes,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Titles in document order, taken from their `SectionBegin` markers.
    pub fn titles(&self) -> impl Iterator<Item = &Title> {
        self.nodes.iter().filter_map(|node| match node {
            Node::SectionBegin(title) => Some(title.as_ref()),
            _ => None,
        })
    }
}
