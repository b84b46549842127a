//! Per-batch session state
//!
//! One [`MoveSession`] lives for a whole batch: it owns the resolved
//! mapping (computed once, read-only afterward) and the visited set that
//! makes repeated visits of the same file idempotent. The driver constructs
//! it up front, so configuration conflicts fail before any file is touched.

use crate::mapping::{resolve_mappings, ResolvedMapping};
use crate::paths::normalize_lexically;
use crate::relocate::PendingRelocation;
use crate::rewriter;
use crate::scanner::scan_references;
use relink_core::config::MoveConfig;
use relink_core::diagnostics::Diagnostic;
use relink_core::error::Result;
use relink_core::messages::ERROR_NO_FILES;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The outcome of processing one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileReport {
    pub diagnostics: Vec<Diagnostic>,
    /// Present when the processed file is itself moving; the driver
    /// executes it after applying this file's fixes.
    pub relocation: Option<PendingRelocation>,
}

impl FileReport {
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty() && self.relocation.is_none()
    }
}

/// Batch-lifetime state shared by every per-file invocation
pub struct MoveSession {
    root: PathBuf,
    mapping: ResolvedMapping,
    visited: HashSet<PathBuf>,
    files_configured: bool,
}

impl MoveSession {
    /// Resolve the configuration into a session
    ///
    /// `working_dir` is the fallback root when the configuration carries no
    /// `root_dir`. Mapping conflicts surface here, before any file is
    /// processed.
    pub fn new(config: &MoveConfig, working_dir: &Path) -> Result<Self> {
        let root = normalize_lexically(
            config
                .root_dir
                .as_deref()
                .unwrap_or(working_dir),
        );
        let mapping = if config.has_files() {
            resolve_mappings(&config.files, &root)?
        } else {
            ResolvedMapping::new()
        };
        Ok(Self {
            root,
            mapping,
            visited: HashSet::new(),
            files_configured: config.has_files(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Process one file's source text
    ///
    /// Relative paths are taken relative to the session root. A path that
    /// was already processed in this batch yields an empty report, which is
    /// what keeps relocations and "has moved" notifications at most-once
    /// when a driver revisits a file.
    pub fn process_file(&mut self, path: &Path, source: &str) -> Result<FileReport> {
        let abs = if path.is_absolute() {
            normalize_lexically(path)
        } else {
            normalize_lexically(&self.root.join(path))
        };

        if !self.visited.insert(abs.clone()) {
            debug!(file = %abs.display(), "already visited, skipping");
            return Ok(FileReport::default());
        }

        if !self.files_configured {
            return Ok(FileReport {
                diagnostics: vec![Diagnostic::at_file_start(ERROR_NO_FILES)],
                relocation: None,
            });
        }

        let references = scan_references(source, &abs)?;
        let report = match self.mapping.get(&abs).cloned() {
            Some(dest) => {
                rewriter::moving_file_report(&abs, &dest, &references, &self.mapping, &self.root)
            }
            None => rewriter::consumer_report(&abs, &references, &self.mapping, &self.root),
        };
        Ok(report)
    }
}
