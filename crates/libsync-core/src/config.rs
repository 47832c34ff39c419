//! Category configuration
//!
//! The `ConfigResolver` turns a library root into the list of [`SyncPair`]s
//! for a run. The mapping comes from an optional `libsync.toml` at the library
//! root; without one, the default categories are synced into `~/.claude`.
//!
//! Destination root precedence:
//! 1. Explicit override (`--dest` / `LIBSYNC_DEST`)
//! 2. `destination` key in `libsync.toml`
//! 3. `$HOME/.claude`

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::{Error, Result, SyncPair};

/// Name of the optional configuration file at the library root
pub const CONFIG_FILE: &str = "libsync.toml";

/// Categories synced when the configuration names none
pub const DEFAULT_CATEGORIES: &[&str] = &["agents", "commands", "skills"];

/// Destination root, relative to the home directory, when nothing else is set
const DEFAULT_DESTINATION_DIR: &str = ".claude";

/// Contents of `libsync.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Destination root; a leading `~/` expands to the home directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    /// Category mapping; empty means [`DEFAULT_CATEGORIES`]
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

/// One category entry in `libsync.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    pub label: String,

    /// Directory under the library root; defaults to the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Directory under the destination root; defaults to the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl CategoryConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            source: None,
            destination: None,
        }
    }

    fn source_dir(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.label)
    }

    fn destination_dir(&self) -> &str {
        self.destination.as_deref().unwrap_or_else(|| self.source_dir())
    }
}

impl LibraryConfig {
    /// Parse configuration text; `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Categories to sync, falling back to the defaults.
    pub fn effective_categories(&self) -> Vec<CategoryConfig> {
        if self.categories.is_empty() {
            DEFAULT_CATEGORIES
                .iter()
                .map(|name| CategoryConfig::new(*name))
                .collect()
        } else {
            self.categories.clone()
        }
    }
}

/// Resolves the sync pairs for a library root
pub struct ConfigResolver {
    /// Library root containing the category directories
    source_root: PathBuf,

    /// Destination root given on the command line or environment
    destination_override: Option<PathBuf>,

    /// Override for the home directory (used for testing).
    /// When `None`, `dirs::home_dir()` is used.
    home_override: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            destination_override: None,
            home_override: None,
        }
    }

    /// Use `destination` as the destination root regardless of configuration.
    pub fn with_destination(mut self, destination: Option<PathBuf>) -> Self {
        self.destination_override = destination;
        self
    }

    /// Use `home` instead of the real home directory.
    pub fn with_home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.home_override = Some(home.into());
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.source_root.join(CONFIG_FILE)
    }

    fn home_dir(&self) -> Result<PathBuf> {
        self.home_override
            .clone()
            .or_else(dirs::home_dir)
            .ok_or(Error::MissingHome)
    }

    /// Load `libsync.toml`, or the default configuration if it is absent.
    pub fn load(&self) -> Result<LibraryConfig> {
        let path = self.config_path();
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(LibraryConfig::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| libsync_fs::Error::io(&path, e))?;
        LibraryConfig::parse(&content, &path)
    }

    /// Resolve the destination root for `config`.
    pub fn destination_root(&self, config: &LibraryConfig) -> Result<PathBuf> {
        if let Some(dest) = &self.destination_override {
            return Ok(dest.clone());
        }

        match config.destination.as_deref() {
            Some(dest) => self.expand_home(dest),
            None => Ok(self.home_dir()?.join(DEFAULT_DESTINATION_DIR)),
        }
    }

    fn expand_home(&self, raw: &str) -> Result<PathBuf> {
        if raw == "~" {
            return self.home_dir();
        }
        match raw.strip_prefix("~/") {
            Some(rest) => Ok(self.home_dir()?.join(rest)),
            None => Ok(PathBuf::from(raw)),
        }
    }

    /// Load the configuration and build one [`SyncPair`] per category.
    pub fn resolve(&self) -> Result<Vec<SyncPair>> {
        let config = self.load()?;
        self.pairs_for(&config)
    }

    /// Build the pairs for an already-loaded configuration.
    pub fn pairs_for(&self, config: &LibraryConfig) -> Result<Vec<SyncPair>> {
        let destination_root = self.destination_root(config)?;
        let mut seen = HashSet::new();
        let mut pairs = Vec::new();

        for category in config.effective_categories() {
            if category.label.trim().is_empty() {
                return Err(self.invalid("category label must not be empty"));
            }
            if !seen.insert(category.label.clone()) {
                return Err(self.invalid(format!("duplicate category '{}'", category.label)));
            }
            self.validate_relative(&category.label, "source", category.source_dir())?;
            self.validate_relative(&category.label, "destination", category.destination_dir())?;

            pairs.push(SyncPair::new(
                self.source_root.join(category.source_dir()),
                destination_root.join(category.destination_dir()),
                category.label.clone(),
            ));
        }

        Ok(pairs)
    }

    /// Category directories must stay inside their root.
    fn validate_relative(&self, label: &str, field: &str, dir: &str) -> Result<()> {
        let path = Path::new(dir);
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if dir.is_empty() || escapes {
            return Err(self.invalid(format!(
                "category '{}' has invalid {} directory '{}'",
                label, field, dir
            )));
        }
        Ok(())
    }

    fn invalid(&self, message: impl Into<String>) -> Error {
        Error::Config {
            path: self.config_path(),
            message: message.into(),
        }
    }
}
