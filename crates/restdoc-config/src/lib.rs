use restdoc_engine::ParseOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid source pattern {pattern:?}: {source}")]
    PatternError {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Failed to list sources: {0}")]
    GlobError(#[from] glob::GlobError),
}

/// Settings for the `restdoc` command-line tool.
///
/// ```toml
/// root = "~/docs"
/// sources = ["**/*.rst"]
///
/// [parser]
/// initial_header_level = 1
/// legacy_table_termination = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory that sources and rooted include targets are relative to.
    pub root: PathBuf,
    /// Glob patterns, relative to `root`.
    pub sources: Vec<String>,
    pub parser: ParseOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            sources: vec!["**/*.rst".to_string()],
            parser: ParseOptions::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the configured root
        config.root = Self::expand_path(&config.root).unwrap_or(config.root);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/restdoc");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Files matched by `sources`, relative to `root`, sorted and without
    /// duplicates.
    pub fn source_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let mut files = Vec::new();
        for pattern in &self.sources {
            let full = self.root.join(pattern);
            let full = full.to_string_lossy();
            let paths = glob::glob(&full).map_err(|source| ConfigError::PatternError {
                pattern: pattern.clone(),
                source,
            })?;
            for path in paths {
                let path = path?;
                if !path.is_file() {
                    continue;
                }
                let relative = path
                    .strip_prefix(&self.root)
                    .map(Path::to_path_buf)
                    .unwrap_or(path);
                files.push(relative);
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
