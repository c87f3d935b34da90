pub mod io;
pub mod models;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::*;
pub use models::*;
pub use parsing::{
    Diagnostic, Directive, DirectiveContext, DirectiveError, DirectiveOptions, Directives,
    ParseError, ParseOptions, ParsedDoc, Parser, parse_document,
};
