use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::io::IoError;

/// Conditions that abort a whole parse.
///
/// Content problems never end up here; they are recorded as
/// [`Diagnostic`](super::env::Diagnostic)s and parsing carries on.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("include target {target:?} not found (resolved to {})", path.display())]
    IncludeNotFound { target: String, path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    #[error("{} is not valid UTF-8", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("include cycle: {}", display_chain(chain))]
    IncludeCycle { chain: Vec<PathBuf> },

    #[error("title unit produced a {found} node")]
    NotATitle { found: &'static str },
}

fn display_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
