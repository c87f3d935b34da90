//! Directives every parser knows about.

use crate::models::{
    Admonition as AdmonitionNode, Image as ImageNode, Node, Raw as RawNode,
    TocTree as TocTreeNode,
};
use crate::parsing::classify;
use crate::parsing::units::dedent;

use super::{Directive, DirectiveContext, DirectiveError, DirectiveOptions, Directives};

const ADMONITION_KINDS: &[&str] = &[
    "attention",
    "caution",
    "danger",
    "error",
    "hint",
    "important",
    "note",
    "tip",
    "warning",
];

pub fn register_all(directives: &mut Directives) {
    directives.register(CodeBlock("code-block"));
    directives.register(CodeBlock("code"));
    directives.register(Raw);
    directives.register(Image);
    for kind in ADMONITION_KINDS {
        directives.register(Admonition(*kind));
    }
    directives.register(GenericAdmonition);
    directives.register(TocTree);
}

/// Puts an unused body back into the document.
fn restore(ctx: &mut DirectiveContext<'_>, body: Option<Node>) {
    if let Some(node) = body {
        ctx.push(node);
    }
}

/// `.. code-block:: language` with a literal body.
pub struct CodeBlock(&'static str);

impl Directive for CodeBlock {
    fn name(&self) -> &str {
        self.0
    }

    fn wants_code(&self) -> bool {
        true
    }

    fn process(
        &self,
        ctx: &mut DirectiveContext<'_>,
        body: Option<Node>,
        variable: &str,
        _data: &[String],
        _options: &DirectiveOptions,
    ) -> Result<(), DirectiveError> {
        match body {
            Some(Node::Code(mut code)) => {
                code.language = (!variable.is_empty()).then(|| variable.to_string());
                ctx.push(Node::Code(code));
                Ok(())
            }
            Some(other) => {
                let found = other.kind();
                ctx.push(other);
                Err(DirectiveError::ExpectedCode { found })
            }
            None => Err(DirectiveError::MissingBody),
        }
    }
}

/// `.. raw:: format` passes its literal body through untouched.
pub struct Raw;

impl Directive for Raw {
    fn name(&self) -> &str {
        "raw"
    }

    fn wants_code(&self) -> bool {
        true
    }

    fn process(
        &self,
        ctx: &mut DirectiveContext<'_>,
        body: Option<Node>,
        variable: &str,
        _data: &[String],
        _options: &DirectiveOptions,
    ) -> Result<(), DirectiveError> {
        if variable.is_empty() {
            restore(ctx, body);
            return Err(DirectiveError::MissingArgument);
        }
        match body {
            Some(Node::Code(code)) => {
                ctx.push(Node::Raw(RawNode {
                    format: variable.to_string(),
                    lines: code.lines,
                }));
                Ok(())
            }
            Some(other) => {
                let found = other.kind();
                ctx.push(other);
                Err(DirectiveError::ExpectedCode { found })
            }
            None => Err(DirectiveError::MissingBody),
        }
    }
}

/// `.. image:: uri`. Has no body of its own; whatever follows is kept.
pub struct Image;

impl Directive for Image {
    fn name(&self) -> &str {
        "image"
    }

    fn process(
        &self,
        ctx: &mut DirectiveContext<'_>,
        body: Option<Node>,
        variable: &str,
        _data: &[String],
        options: &DirectiveOptions,
    ) -> Result<(), DirectiveError> {
        if variable.is_empty() {
            restore(ctx, body);
            return Err(DirectiveError::MissingArgument);
        }
        ctx.push(Node::Image(ImageNode {
            uri: variable.to_string(),
            options: options.clone(),
        }));
        restore(ctx, body);
        Ok(())
    }
}

/// Parses an indented body into child nodes, whatever node the indented
/// lines first became. Anything else is handed back to be restored after the
/// admonition.
fn admonition_children(
    ctx: &mut DirectiveContext<'_>,
    body: Option<Node>,
    data: &[String],
) -> Result<(Vec<Node>, Option<Node>), DirectiveError> {
    let indented = data
        .iter()
        .find(|line| !classify::is_blank(line))
        .is_some_and(|line| classify::is_indented(line));
    match body {
        Some(node) if indented && !matches!(node, Node::Code(_)) => {
            Ok((ctx.parse_fragment(&dedent(data))?, None))
        }
        other => Ok((Vec::new(), other)),
    }
}

/// `.. note::`, `.. warning::` and friends. Text after `::` becomes the first
/// paragraph.
pub struct Admonition(&'static str);

impl Directive for Admonition {
    fn name(&self) -> &str {
        self.0
    }

    fn process(
        &self,
        ctx: &mut DirectiveContext<'_>,
        body: Option<Node>,
        variable: &str,
        data: &[String],
        _options: &DirectiveOptions,
    ) -> Result<(), DirectiveError> {
        let (mut children, rest) = admonition_children(ctx, body, data)?;
        if !variable.is_empty() {
            children.insert(0, Node::Paragraph(ctx.inline(variable)));
        }
        ctx.push(Node::Admonition(AdmonitionNode {
            kind: self.0.to_string(),
            title: None,
            children,
        }));
        restore(ctx, rest);
        Ok(())
    }
}

/// `.. admonition:: Title` with a required title.
pub struct GenericAdmonition;

impl Directive for GenericAdmonition {
    fn name(&self) -> &str {
        "admonition"
    }

    fn process(
        &self,
        ctx: &mut DirectiveContext<'_>,
        body: Option<Node>,
        variable: &str,
        data: &[String],
        _options: &DirectiveOptions,
    ) -> Result<(), DirectiveError> {
        if variable.is_empty() {
            restore(ctx, body);
            return Err(DirectiveError::MissingArgument);
        }
        let title = ctx.inline(variable);
        let (children, rest) = admonition_children(ctx, body, data)?;
        ctx.push(Node::Admonition(AdmonitionNode {
            kind: "admonition".to_string(),
            title: Some(title),
            children,
        }));
        restore(ctx, rest);
        Ok(())
    }
}

/// `.. toctree::` listing one document per body line.
pub struct TocTree;

impl Directive for TocTree {
    fn name(&self) -> &str {
        "toctree"
    }

    fn process(
        &self,
        ctx: &mut DirectiveContext<'_>,
        body: Option<Node>,
        _variable: &str,
        data: &[String],
        options: &DirectiveOptions,
    ) -> Result<(), DirectiveError> {
        let max_depth = match options.get("maxdepth").map(|value| parse_depth(value)).transpose() {
            Ok(depth) => depth,
            Err(err) => {
                restore(ctx, body);
                return Err(err);
            }
        };

        let (entries, rest) = match body {
            Some(Node::Block(_)) => (
                data.iter()
                    .map(|line| line.trim())
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect(),
                None,
            ),
            other => (Vec::new(), other),
        };

        ctx.push(Node::TocTree(TocTreeNode { entries, max_depth }));
        restore(ctx, rest);
        Ok(())
    }
}

fn parse_depth(value: &str) -> Result<usize, DirectiveError> {
    value.parse().map_err(|_| DirectiveError::InvalidOption {
        option: "maxdepth".to_string(),
        value: value.to_string(),
    })
}
