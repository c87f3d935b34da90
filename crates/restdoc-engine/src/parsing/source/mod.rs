//! # Line Source
//!
//! Turns raw document text into the line sequence the state machine walks:
//!
//! 1. unify line endings
//! 2. pad with one blank line before and after
//! 3. expand `.. include::` lines recursively
//! 4. drop byte-order marks, turn non-breaking spaces into spaces
//! 5. split into [`Lines`] with one line of lookahead

pub mod include;
pub mod lines;
pub mod normalize;

use std::path::Path;

use crate::io::Origin;

use super::error::ParseError;

pub use include::IncludeExpander;
pub use lines::{LineView, Lines};

/// Normalizes `raw` and expands its includes. `current` is the file the text
/// was read from, if any.
pub fn prepare(raw: &str, origin: &dyn Origin, current: Option<&Path>) -> Result<String, ParseError> {
    let text = normalize::pad(&normalize::unify_line_endings(raw));
    let text = IncludeExpander::new(origin, current).expand(&text)?;
    Ok(normalize::clean_characters(&text))
}
