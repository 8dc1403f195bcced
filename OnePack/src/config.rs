//! Pack options and the optional `onepack.toml` project config

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::resolver::parse_include_list;

/// Project config filename, looked up at the source root
pub const CONFIG_FILE_NAME: &str = "onepack.toml";

/// What to pack and which extra patterns to include
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOptions {
    /// Directory holding `mod.json`
    pub source_root: PathBuf,
    /// Extra glob patterns, relative to the source root
    pub include: Vec<String>,
}

impl PackOptions {
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            include: Vec::new(),
        }
    }

    /// Add patterns from a comma-separated list (the `--include` flag)
    #[must_use]
    pub fn with_include_list(mut self, list: &str) -> Self {
        self.include.extend(parse_include_list(list));
        self
    }

    /// Add patterns one by one
    #[must_use]
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(patterns.into_iter().map(Into::into));
        self
    }
}

/// The optional project config (`onepack.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub pack: PackSettings,
}

/// `[pack]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSettings {
    /// Include patterns applied before any given on the command line
    #[serde(default)]
    pub include: Vec<String>,
}

impl ProjectConfig {
    /// Load `onepack.toml` from the source root
    ///
    /// A missing file is the default config.
    ///
    /// # Errors
    /// [`Error::ConfigUnreadable`] if the file exists but cannot be read or parsed.
    pub fn load(source_root: &Path) -> Result<Self> {
        let path = source_root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::ConfigUnreadable {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::ConfigUnreadable {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            "Loaded {} with {} include pattern(s)",
            path.display(),
            config.pack.include.len()
        );
        Ok(config)
    }

    /// Config patterns first, then the ones from `options`
    #[must_use]
    pub fn include_patterns(&self, options: &PackOptions) -> Vec<String> {
        self.pack
            .include
            .iter()
            .chain(&options.include)
            .cloned()
            .collect()
    }
}
