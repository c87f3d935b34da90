use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::parsing::inline::Inline;

/// One structural unit of a parsed document.
///
/// Section nesting is expressed with paired `SectionBegin`/`SectionEnd`
/// markers that share the same [`Title`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Node {
    Paragraph(Inline),
    Title(Arc<Title>),
    SectionBegin(Arc<Title>),
    SectionEnd(Arc<Title>),
    /// A transition line; the value is the level of its underline character.
    Separator(usize),
    Anchor(String),
    Code(Code),
    List(List),
    DefinitionList(DefinitionList),
    Table(Table),
    Comment(Comment),
    Block(Block),
    Admonition(Admonition),
    Image(Image),
    Raw(Raw),
    TocTree(TocTree),
}

impl Node {
    /// Short, stable name of the variant (used in logs and error messages).
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Paragraph(_) => "paragraph",
            Node::Title(_) => "title",
            Node::SectionBegin(_) => "section-begin",
            Node::SectionEnd(_) => "section-end",
            Node::Separator(_) => "separator",
            Node::Anchor(_) => "anchor",
            Node::Code(_) => "code",
            Node::List(_) => "list",
            Node::DefinitionList(_) => "definition-list",
            Node::Table(_) => "table",
            Node::Comment(_) => "comment",
            Node::Block(_) => "block",
            Node::Admonition(_) => "admonition",
            Node::Image(_) => "image",
            Node::Raw(_) => "raw",
            Node::TocTree(_) => "toctree",
        }
    }
}

/// A section title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    /// Nesting depth, 1 being the outermost section.
    pub level: usize,
    /// The underline character the level was derived from.
    pub marker: char,
    pub text: Inline,
    /// Slug identifying the section, unique within its document.
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Code {
    pub language: Option<String>,
    pub lines: Vec<String>,
}

impl Code {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    /// Indentation width of the marker.
    pub depth: usize,
    pub marker: String,
    pub text: Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionList {
    pub items: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub term: Inline,
    pub classifiers: Vec<Inline>,
    /// One entry per paragraph of the definition body.
    pub paragraphs: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// How many leading entries of `rows` form the header.
    pub header_rows: usize,
    pub rows: Vec<Vec<Inline>>,
}

impl Table {
    pub fn columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub lines: Vec<String>,
}

/// An indented region, dedented, kept as raw lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Admonition {
    pub kind: String,
    pub title: Option<Inline>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub uri: String,
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Raw {
    pub format: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocTree {
    pub entries: Vec<String>,
    pub max_depth: Option<usize>,
}
