//! # Parsing
//!
//! Turns document text into a [`Document`]: an ordered sequence of nodes in
//! which sections are bracketed by `SectionBegin`/`SectionEnd` markers.
//!
//! ## Pipeline
//!
//! 1. **Line source** ([`source`]): normalize line endings, pad, expand
//!    includes, clean characters, split into lines with lookahead.
//! 2. **State machine** ([`driver`]): classify each line ([`classify`]) and
//!    either accumulate it in the [`buffer`] or hand it to a parsing unit
//!    ([`units`]). Flushing turns the buffer into a node.
//! 3. **Directives** ([`directives`]): `.. name::` blocks are resolved against
//!    a registry and invoked with the node built from their body.
//!
//! Include failures abort the parse with a [`ParseError`]. Everything else a
//! document can get wrong is recorded as a [`Diagnostic`] and parsing goes on.

pub mod buffer;
pub mod classify;
pub mod directives;
pub mod driver;
pub mod env;
pub mod error;
pub mod inline;
pub mod sections;
pub mod snapshot;
pub mod source;
pub mod state;
pub mod units;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::Path;

use crate::io::{FsOrigin, Origin};
use crate::models::Document;

pub use directives::{Directive, DirectiveContext, DirectiveError, DirectiveOptions, Directives};
pub use driver::DocumentParser;
pub use env::{Diagnostic, Environment, ParseOptions};
pub use error::ParseError;
pub use source::Lines;

pub type PreParseHook = Box<dyn Fn(&mut String) + Send + Sync>;
pub type PostParseHook = Box<dyn Fn(&Document) + Send + Sync>;

/// Result of a successful parse.
#[derive(Debug)]
pub struct ParsedDoc {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
    /// Named hyperlink targets, by normalized name.
    pub links: BTreeMap<String, String>,
}

/// Parser configuration: directive registry, source origin, options and
/// hooks. One `Parser` can parse any number of documents; every parse gets a
/// fresh [`Environment`].
pub struct Parser {
    directives: Directives,
    origin: Box<dyn Origin>,
    options: ParseOptions,
    pre_parse: Vec<PreParseHook>,
    post_parse: Vec<PostParseHook>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// A parser with the built-in directives reading includes relative to the
    /// working directory.
    pub fn new() -> Self {
        Self {
            directives: Directives::builtin(),
            origin: Box::new(FsOrigin::default()),
            options: ParseOptions::default(),
            pre_parse: Vec::new(),
            post_parse: Vec::new(),
        }
    }

    pub fn with_origin(mut self, origin: impl Origin + 'static) -> Self {
        self.origin = Box::new(origin);
        self
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_directives(mut self, directives: Directives) -> Self {
        self.directives = directives;
        self
    }

    pub fn register(&mut self, directive: impl Directive + 'static) -> &mut Self {
        self.directives.register(directive);
        self
    }

    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Adds a hook that may rewrite the raw text before it is prepared.
    pub fn on_pre_parse(&mut self, hook: impl Fn(&mut String) + Send + Sync + 'static) -> &mut Self {
        self.pre_parse.push(Box::new(hook));
        self
    }

    /// Adds a hook that sees every finished document.
    pub fn on_post_parse(&mut self, hook: impl Fn(&Document) + Send + Sync + 'static) -> &mut Self {
        self.post_parse.push(Box::new(hook));
        self
    }

    /// Parses text that does not come from a file; includes resolve against
    /// the origin root.
    pub fn parse(&self, text: &str) -> Result<ParsedDoc, ParseError> {
        self.parse_source(text, None)
    }

    /// Reads `path` through the origin and parses it. Includes resolve
    /// relative to the file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParsedDoc, ParseError> {
        let path = path.as_ref();
        let bytes = self.origin.read(path).map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|source| ParseError::Encoding {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_source(&text, Some(path))
    }

    fn parse_source(&self, text: &str, file: Option<&Path>) -> Result<ParsedDoc, ParseError> {
        let mut raw = text.to_string();
        for hook in &self.pre_parse {
            hook(&mut raw);
        }

        let prepared = source::prepare(&raw, self.origin.as_ref(), file)?;
        let lines = Lines::split(&prepared);

        let mut env = Environment::new(self.options.clone());
        if let Some(path) = file {
            env = env.with_file(path);
        }
        let nodes = DocumentParser::new(&mut env, &self.directives).run(&lines)?;

        let document = Document::from_nodes(text, nodes);
        for hook in &self.post_parse {
            hook(&document);
        }

        Ok(ParsedDoc {
            document,
            diagnostics: env.take_diagnostics(),
            links: env.links().clone(),
        })
    }
}

/// Parses `text` with a default [`Parser`].
pub fn parse_document(text: &str) -> Result<ParsedDoc, ParseError> {
    Parser::new().parse(text)
}
