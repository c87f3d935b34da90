use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::inline::{Inline, parse_inline};

/// Settings that change how a document is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Level given to the first underline style met in a document.
    pub initial_header_level: usize,
    /// When set, the line that ends a table is dropped instead of being
    /// parsed again.
    pub legacy_table_termination: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            initial_header_level: 1,
            legacy_table_termination: false,
        }
    }
}

/// A recoverable problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    /// Line of the prepared source the parser was on.
    pub line: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Per-document services shared by the state machine and directives:
/// link registry, section level registry, diagnostics and section ids.
#[derive(Debug, Default)]
pub struct Environment {
    options: ParseOptions,
    current_file: Option<PathBuf>,
    line: usize,
    links: BTreeMap<String, String>,
    anonymous: Vec<String>,
    levels: Vec<char>,
    ids: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl Environment {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.current_file = Some(path.into());
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Name of the current file for messages.
    pub fn file_label(&self) -> String {
        match &self.current_file {
            Some(path) => path.display().to_string(),
            None => "<input>".to_string(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    /// Registers a named hyperlink target. Names are case-insensitive and
    /// whitespace-normalized; a later target with the same name wins.
    pub fn set_link(&mut self, name: &str, url: &str) {
        let key = normalize_name(name);
        debug!("link {key:?} -> {url}");
        self.links.insert(key, url.to_string());
    }

    pub fn link(&self, name: &str) -> Option<&str> {
        self.links.get(&normalize_name(name)).map(String::as_str)
    }

    pub fn links(&self) -> &BTreeMap<String, String> {
        &self.links
    }

    pub fn add_anonymous_link(&mut self, url: &str) {
        self.anonymous.push(url.to_string());
    }

    /// Anonymous targets in document order.
    pub fn anonymous_links(&self) -> &[String] {
        &self.anonymous
    }

    /// Nesting depth of an underline character, 1-based, in order of first
    /// appearance.
    pub fn level_for(&mut self, marker: char) -> usize {
        match self.levels.iter().position(|&c| c == marker) {
            Some(index) => index + 1,
            None => {
                self.levels.push(marker);
                self.levels.len()
            }
        }
    }

    /// Section level for an underline character, offset by
    /// `initial_header_level`.
    pub fn title_level(&mut self, marker: char) -> usize {
        self.options.initial_header_level + self.level_for(marker) - 1
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            message: message.into(),
            line: self.line,
        };
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// A slug of `text` that no earlier call in this document returned.
    pub fn unique_id(&mut self, text: &str) -> String {
        let slug = slugify(text);
        let mut id = slug.clone();
        let mut suffix = 0;
        while self.ids.contains(&id) {
            suffix += 1;
            id = format!("{slug}-{suffix}");
        }
        self.ids.insert(id.clone());
        id
    }

    /// Parses inline markup and registers any embedded `<url>` targets.
    pub fn inline(&mut self, text: &str) -> Inline {
        let inline = parse_inline(text);
        for (name, url) in inline.embedded_targets() {
            let key = normalize_name(name);
            self.links.entry(key).or_insert_with(|| url.to_string());
        }
        inline
    }
}

fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn slugify(text: &str) -> String {
    let mut slug = String::new();
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}
