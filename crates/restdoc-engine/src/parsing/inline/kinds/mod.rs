//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters. The parser refers
//! to these constants; it never hardcodes `**` or `` ` ``.

pub mod markup;
pub mod reference;

pub use markup::{Emphasis, Interpreted, Literal, Strong};
pub use reference::Reference;
