use std::fmt::{self, Write};
use std::sync::Arc;

use crate::models::{Document, Node, Title};
use crate::parsing::inline::{Inline, InlineNode};

/// Renders inline content with light markup so snapshots show structure.
pub fn render_inline(inline: &Inline) -> String {
    inline
        .nodes()
        .iter()
        .map(|node| match node {
            InlineNode::Text { text } => text.clone(),
            InlineNode::Emphasis { text } => format!("*{text}*"),
            InlineNode::Strong { text } => format!("**{text}**"),
            InlineNode::Literal { text } => format!("``{text}``"),
            InlineNode::Role { role, text } => format!(":{role}:`{text}`"),
            InlineNode::Reference {
                text,
                url,
                anonymous,
            } => {
                let suffix = if *anonymous { "__" } else { "_" };
                match url {
                    Some(url) => format!("[{text} <{url}>]{suffix}"),
                    None => format!("[{text}]{suffix}"),
                }
            }
        })
        .collect()
}

/// One line per node, indented by section depth. A `SectionEnd` is written at
/// the depth of its `SectionBegin`.
pub fn normalize(document: &Document) -> String {
    let mut out = String::new();
    let mut open: Vec<(&Arc<Title>, usize)> = Vec::new();
    for node in document.nodes() {
        let depth = open.last().map_or(0, |(_, depth)| depth + 1);
        let depth = match node {
            Node::SectionBegin(title) => {
                open.push((title, depth));
                depth
            }
            Node::SectionEnd(title) => {
                match open.iter().position(|(t, _)| Arc::ptr_eq(t, title)) {
                    Some(index) => open.remove(index).1,
                    None => depth,
                }
            }
            _ => depth,
        };
        // Writing to a String cannot fail.
        let _ = write_node(&mut out, node, depth);
    }
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) -> fmt::Result {
    let pad = "  ".repeat(depth);
    match node {
        Node::Paragraph(inline) => writeln!(out, "{pad}paragraph {:?}", render_inline(inline)),
        Node::Title(title) | Node::SectionBegin(title) => writeln!(
            out,
            "{pad}section h{} #{} {:?}",
            title.level,
            title.id,
            render_inline(&title.text)
        ),
        Node::SectionEnd(title) => writeln!(out, "{pad}end #{}", title.id),
        Node::Separator(level) => writeln!(out, "{pad}separator {level}"),
        Node::Anchor(name) => writeln!(out, "{pad}anchor {name:?}"),
        Node::Code(code) => {
            let language = code.language.as_deref().unwrap_or("-");
            writeln!(out, "{pad}code {language}")?;
            write_lines(out, &pad, &code.lines)
        }
        Node::List(list) => {
            let kind = if list.ordered { "ordered" } else { "bullet" };
            writeln!(out, "{pad}list {kind}")?;
            for item in &list.items {
                writeln!(
                    out,
                    "{pad}  item {} {} {:?}",
                    item.depth,
                    item.marker,
                    render_inline(&item.text)
                )?;
            }
            Ok(())
        }
        Node::DefinitionList(list) => {
            writeln!(out, "{pad}definitions")?;
            for item in &list.items {
                let classifiers: Vec<_> = item.classifiers.iter().map(render_inline).collect();
                writeln!(
                    out,
                    "{pad}  term {:?} {classifiers:?}",
                    render_inline(&item.term)
                )?;
                for paragraph in &item.paragraphs {
                    writeln!(out, "{pad}    {:?}", render_inline(paragraph))?;
                }
            }
            Ok(())
        }
        Node::Table(table) => {
            writeln!(
                out,
                "{pad}table {}x{} header={}",
                table.rows.len(),
                table.columns(),
                table.header_rows
            )?;
            for row in &table.rows {
                let cells: Vec<_> = row.iter().map(render_inline).collect();
                writeln!(out, "{pad}  | {} |", cells.join(" | "))?;
            }
            Ok(())
        }
        Node::Comment(comment) => writeln!(out, "{pad}comment {:?}", comment.lines),
        Node::Block(block) => {
            writeln!(out, "{pad}block")?;
            write_lines(out, &pad, &block.lines)
        }
        Node::Admonition(admonition) => {
            let title = admonition
                .title
                .as_ref()
                .map(render_inline)
                .unwrap_or_default();
            writeln!(out, "{pad}admonition {} {title:?}", admonition.kind)?;
            for child in &admonition.children {
                write_node(out, child, depth + 1)?;
            }
            Ok(())
        }
        Node::Image(image) => writeln!(out, "{pad}image {} {:?}", image.uri, image.options),
        Node::Raw(raw) => {
            writeln!(out, "{pad}raw {}", raw.format)?;
            write_lines(out, &pad, &raw.lines)
        }
        Node::TocTree(toc) => writeln!(
            out,
            "{pad}toctree {:?} maxdepth={:?}",
            toc.entries, toc.max_depth
        ),
    }
}

fn write_lines(out: &mut String, pad: &str, lines: &[String]) -> fmt::Result {
    for line in lines {
        writeln!(out, "{pad}  | {line}")?;
    }
    Ok(())
}
