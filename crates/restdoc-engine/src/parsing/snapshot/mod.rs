//! # Snapshot Testing Support
//!
//! - **`normalize`**: renders a parsed [`Document`](crate::models::Document) as
//!   an indented text outline for `insta` snapshots
//! - **`invariants`**: structural checks every parse must satisfy (section
//!   markers pair up, open section levels increase)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{normalize, render_inline};
