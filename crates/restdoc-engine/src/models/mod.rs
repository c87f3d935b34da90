pub mod document;
pub mod node;

pub use document::Document;
pub use node::{
    Admonition, Block, Code, Comment, Definition, DefinitionList, Image, List, ListItem, Node,
    Raw, Table, Title, TocTree,
};
