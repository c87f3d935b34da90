use serde::Serialize;

/// A parsed inline node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineNode {
    Text { text: String },
    Emphasis { text: String },
    Strong { text: String },
    /// Inline literal. A raw zone: nothing inside is parsed.
    Literal { text: String },
    /// Interpreted text with its role (`title-reference` when none was given).
    Role { role: String, text: String },
    Reference {
        text: String,
        /// Embedded target from the `text <url>` form.
        url: Option<String>,
        anonymous: bool,
    },
}

impl InlineNode {
    /// Visible text of the node.
    pub fn text(&self) -> &str {
        match self {
            InlineNode::Text { text }
            | InlineNode::Emphasis { text }
            | InlineNode::Strong { text }
            | InlineNode::Literal { text }
            | InlineNode::Role { text, .. }
            | InlineNode::Reference { text, .. } => text,
        }
    }
}

/// Inline content of a paragraph, title, list item or table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Inline(pub Vec<InlineNode>);

impl Inline {
    pub fn nodes(&self) -> &[InlineNode] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The text with all markup removed.
    pub fn plain_text(&self) -> String {
        self.0.iter().map(InlineNode::text).collect()
    }

    /// References carrying an embedded URL, as `(text, url)` pairs.
    pub fn embedded_targets(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|node| match node {
            InlineNode::Reference {
                text,
                url: Some(url),
                ..
            } => Some((text.as_str(), url.as_str())),
            _ => None,
        })
    }
}
