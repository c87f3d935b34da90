//! # Inline Parsing
//!
//! Cursor-based parsing of the text inside paragraphs, titles, list items,
//! definitions and table cells.
//!
//! ## Precedence
//!
//! Inline literals are raw zones and win over everything else; strong
//! emphasis is tried before emphasis; roles before plain interpreted text.
//! Unclosed constructs fall back to text.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::parse_inline;
pub use types::{Inline, InlineNode};
