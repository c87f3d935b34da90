use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::io::Origin;
use crate::parsing::error::ParseError;

use super::normalize::unify_line_endings;

static INCLUDE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.\. include:: (.+)$").expect("valid include regex"));

/// Replaces `.. include:: target` lines with the target's contents,
/// recursively.
///
/// Keeps the chain of files currently being expanded; meeting one of them
/// again is an include cycle.
pub struct IncludeExpander<'a> {
    origin: &'a dyn Origin,
    stack: Vec<PathBuf>,
}

impl<'a> IncludeExpander<'a> {
    pub fn new(origin: &'a dyn Origin, current: Option<&Path>) -> Self {
        Self {
            origin,
            stack: current.map(Path::to_path_buf).into_iter().collect(),
        }
    }

    pub fn expand(&mut self, text: &str) -> Result<String, ParseError> {
        let mut out = Vec::new();
        for line in text.split('\n') {
            match INCLUDE_LINE.captures(line) {
                Some(caps) => out.push(self.include(caps[1].trim())?),
                None => out.push(line.to_string()),
            }
        }
        Ok(out.join("\n"))
    }

    fn include(&mut self, target: &str) -> Result<String, ParseError> {
        let path = self
            .origin
            .resolve(self.stack.last().map(PathBuf::as_path), target);

        if self.stack.contains(&path) {
            let mut chain = self.stack.clone();
            chain.push(path);
            return Err(ParseError::IncludeCycle { chain });
        }
        if !self.origin.exists(&path) {
            return Err(ParseError::IncludeNotFound {
                target: target.to_string(),
                path,
            });
        }

        let bytes = self
            .origin
            .read(&path)
            .map_err(|source| ParseError::Read {
                path: path.clone(),
                source,
            })?;
        let contents = String::from_utf8(bytes).map_err(|source| ParseError::Encoding {
            path: path.clone(),
            source,
        })?;

        debug!("including {}", path.display());
        self.stack.push(path);
        let expanded = self.expand(&unify_line_endings(&contents));
        self.stack.pop();
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::FsOrigin;
    use crate::tests::{create_test_dir, create_test_file};
    use pretty_assertions::assert_eq;

    #[test]
    fn text_without_includes_is_unchanged() {
        let origin = FsOrigin::default();
        let mut expander = IncludeExpander::new(&origin, None);
        assert_eq!(expander.expand("a\nb").unwrap(), "a\nb");
    }

    #[test]
    fn include_line_is_replaced() {
        let dir = create_test_dir();
        create_test_file(&dir, "part.rst", "Included\r\n");
        let origin = FsOrigin::new(dir.path());

        let mut expander = IncludeExpander::new(&origin, None);
        let text = expander.expand("Before\n.. include:: part.rst\nAfter").unwrap();
        assert_eq!(text, "Before\nIncluded\n\nAfter");
    }

    #[test]
    fn nested_include_resolves_against_including_file() {
        let dir = create_test_dir();
        create_test_file(&dir, "chapters/one.rst", "One\n.. include:: detail.rst");
        create_test_file(&dir, "chapters/detail.rst", "Detail");
        let origin = FsOrigin::new(dir.path());

        let mut expander = IncludeExpander::new(&origin, None);
        let text = expander.expand(".. include:: chapters/one.rst").unwrap();
        assert_eq!(text, "One\nDetail");
    }

    #[test]
    fn missing_include_is_fatal() {
        let dir = create_test_dir();
        let origin = FsOrigin::new(dir.path());

        let mut expander = IncludeExpander::new(&origin, None);
        let err = expander.expand(".. include:: nope.rst").unwrap_err();
        assert!(matches!(err, ParseError::IncludeNotFound { .. }));
    }

    #[test]
    fn self_include_is_a_cycle() {
        let dir = create_test_dir();
        create_test_file(&dir, "loop.rst", "Again\n.. include:: loop.rst");
        let origin = FsOrigin::new(dir.path());

        let mut expander = IncludeExpander::new(&origin, Some(Path::new("loop.rst")));
        let err = expander.expand(".. include:: loop.rst").unwrap_err();
        match err {
            ParseError::IncludeCycle { chain } => assert_eq!(chain.len(), 2),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn mutual_include_is_a_cycle() {
        let dir = create_test_dir();
        create_test_file(&dir, "a.rst", ".. include:: b.rst");
        create_test_file(&dir, "b.rst", ".. include:: a.rst");
        let origin = FsOrigin::new(dir.path());

        let mut expander = IncludeExpander::new(&origin, None);
        let err = expander.expand(".. include:: a.rst").unwrap_err();
        assert_eq!(err.to_string(), "include cycle: a.rst -> b.rst -> a.rst");
    }

    #[test]
    fn same_file_included_twice_is_not_a_cycle() {
        let dir = create_test_dir();
        create_test_file(&dir, "note.rst", "Note");
        let origin = FsOrigin::new(dir.path());

        let mut expander = IncludeExpander::new(&origin, None);
        let text = expander
            .expand(".. include:: note.rst\n.. include:: note.rst")
            .unwrap();
        assert_eq!(text, "Note\nNote");
    }
}
