//! # Directives
//!
//! Named block extensions written `.. name:: variable`, optionally followed by
//! indented options and a body. The state machine opens a [`PendingDirective`]
//! when it reads the header and invokes the registered [`Directive`] on the
//! next flush, handing it the node built from the body.

pub mod builtin;
pub mod context;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::models::Node;

use super::{classify::DirectiveHeader, error::ParseError};

pub use context::DirectiveContext;

/// Options given to a directive, by name.
pub type DirectiveOptions = BTreeMap<String, String>;

/// Failures a directive reports. They become diagnostics; parsing carries on.
#[derive(Debug, Error)]
pub enum DirectiveError {
    #[error("missing argument")]
    MissingArgument,

    #[error("missing body")]
    MissingBody,

    #[error("expected a literal body, found {found}")]
    ExpectedCode { found: &'static str },

    #[error("invalid value {value:?} for option {option:?}")]
    InvalidOption { option: String, value: String },

    #[error("failed to parse body: {0}")]
    Fragment(#[from] Box<ParseError>),

    #[error("{0}")]
    Custom(String),
}

pub trait Directive: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the body is literal text, parsed as a `Code` node.
    fn wants_code(&self) -> bool {
        false
    }

    /// Runs the directive. `body` is the node built from the lines after the
    /// header and options, `data` those lines unparsed. A directive that does
    /// not use `body` should push it back through the context.
    fn process(
        &self,
        ctx: &mut DirectiveContext<'_>,
        body: Option<Node>,
        variable: &str,
        data: &[String],
        options: &DirectiveOptions,
    ) -> Result<(), DirectiveError>;
}

/// A directive whose header has been read and that waits for its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDirective {
    pub header: DirectiveHeader,
    pub options: DirectiveOptions,
    /// Line of the header.
    pub line: usize,
}

impl PendingDirective {
    pub fn new(header: DirectiveHeader, line: usize) -> Self {
        Self {
            header,
            options: DirectiveOptions::new(),
            line,
        }
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }
}

/// Directive implementations by name. Names are matched case-insensitively.
#[derive(Clone, Default)]
pub struct Directives {
    table: HashMap<String, Arc<dyn Directive>>,
}

impl Directives {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in directives.
    pub fn builtin() -> Self {
        let mut directives = Self::new();
        builtin::register_all(&mut directives);
        directives
    }

    /// Adds a directive, replacing any with the same name.
    pub fn register(&mut self, directive: impl Directive + 'static) {
        self.register_arc(Arc::new(directive));
    }

    pub fn register_arc(&mut self, directive: Arc<dyn Directive>) {
        self.table
            .insert(directive.name().to_lowercase(), directive);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Directive> {
        self.table.get(&name.to_lowercase()).map(Arc::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(&name.to_lowercase())
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Directives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directives")
            .field("names", &self.names())
            .finish()
    }
}
