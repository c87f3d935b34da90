use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where document sources come from.
///
/// Paths handed to `exists` and `read` are either absolute or relative to
/// [`Origin::root`].
pub trait Origin: Send + Sync {
    /// Directory that root-relative paths (and targets starting with `/`)
    /// are resolved against.
    fn root(&self) -> &Path;

    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> Result<Vec<u8>, IoError>;

    /// Resolves an include target.
    ///
    /// Targets starting with `/` are relative to the root; anything else is
    /// relative to the directory of `current`, the file holding the include.
    fn resolve(&self, current: Option<&Path>, target: &str) -> PathBuf {
        let target = target.trim();
        match target.strip_prefix('/') {
            Some(rooted) => RelativePath::new(rooted).to_logical_path(""),
            None => {
                let base = current.and_then(Path::parent).unwrap_or(Path::new(""));
                RelativePath::new(target).to_logical_path(base)
            }
        }
    }
}

/// Reads sources from the file system below a root directory.
#[derive(Debug, Clone)]
pub struct FsOrigin {
    root: PathBuf,
}

impl FsOrigin {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn locate(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for FsOrigin {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Origin for FsOrigin {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, path: &Path) -> bool {
        self.locate(path).is_file()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, IoError> {
        let absolute_path = self.locate(path);
        if !absolute_path.exists() {
            return Err(IoError::NotFound(absolute_path));
        }
        fs::read(&absolute_path).map_err(IoError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};

    #[test]
    fn test_read_existing_file() {
        let dir = create_test_dir();
        create_test_file(&dir, "index.rst", "Hello");

        let origin = FsOrigin::new(dir.path());
        assert!(origin.exists(Path::new("index.rst")));
        assert_eq!(origin.read(Path::new("index.rst")).unwrap(), b"Hello");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = create_test_dir();
        let origin = FsOrigin::new(dir.path());

        assert!(!origin.exists(Path::new("missing.rst")));
        assert!(matches!(
            origin.read(Path::new("missing.rst")),
            Err(IoError::NotFound(_))
        ));
    }

    #[test]
    fn test_directory_is_not_a_source() {
        let dir = create_test_dir();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let origin = FsOrigin::new(dir.path());

        assert!(!origin.exists(Path::new("sub")));
    }

    #[test]
    fn test_resolve_relative_to_current_file() {
        let origin = FsOrigin::new("/docs");
        assert_eq!(
            origin.resolve(Some(Path::new("guide/index.rst")), "parts/intro.rst"),
            PathBuf::from("guide/parts/intro.rst")
        );
    }

    #[test]
    fn test_resolve_parent_segments() {
        let origin = FsOrigin::new("/docs");
        assert_eq!(
            origin.resolve(Some(Path::new("guide/index.rst")), "../shared.rst"),
            PathBuf::from("shared.rst")
        );
    }

    #[test]
    fn test_resolve_rooted_target() {
        let origin = FsOrigin::new("/docs");
        assert_eq!(
            origin.resolve(Some(Path::new("guide/index.rst")), "/shared.rst"),
            PathBuf::from("shared.rst")
        );
    }

    #[test]
    fn test_resolve_without_current_file() {
        let origin = FsOrigin::new("/docs");
        assert_eq!(origin.resolve(None, "a.rst"), PathBuf::from("a.rst"));
    }
}
