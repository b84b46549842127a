//! Rule configuration for file moves
//!
//! The configuration is the declarative `{ sourcePattern: targetPattern }`
//! table plus an optional project root. It is loaded from a TOML or JSON
//! file by the CLI, or built directly in tests.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Declarative mapping from source-file patterns to destination patterns
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MoveConfig {
    /// Source pattern (literal path or glob) to target pattern (literal
    /// path, `{query}` template, or directory)
    #[serde(default)]
    pub files: BTreeMap<String, String>,

    /// Project root that `rootDir`/`dir` path queries resolve against.
    /// Defaults to the process working directory when absent.
    #[serde(default, alias = "rootDir")]
    pub root_dir: Option<PathBuf>,
}

impl MoveConfig {
    /// Build a configuration from an iterator of `(source, target)` pairs
    pub fn from_pairs<S, T>(pairs: impl IntoIterator<Item = (S, T)>) -> Self
    where
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            files: pairs
                .into_iter()
                .map(|(s, t)| (s.into(), t.into()))
                .collect(),
            root_dir: None,
        }
    }

    /// Load a configuration from a TOML or JSON file, selected by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "json" => serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {e}", path.display()))),
            "toml" | "" => toml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {e}", path.display()))),
            other => Err(Error::config(format!(
                "unsupported config format \".{other}\" in {}",
                path.display()
            ))),
        }
    }

    /// Whether any file mappings are configured
    ///
    /// An empty table is a configuration error reported per file, not a
    /// hard failure (see the engine's session handling).
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}
