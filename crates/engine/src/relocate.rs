//! Physical content relocation
//!
//! The engine never moves bytes while a file is being processed; it returns
//! a [`PendingRelocation`] and the driver executes it only after the
//! rewritten text has been written at the old path. That ordering is what
//! guarantees the relocated file carries the post-rewrite text.

use relink_core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A relocation computed during file processing, executed by the driver
/// after the file's text fixes are durably applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRelocation {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl PendingRelocation {
    /// Read the (post-rewrite) content from the old path and move it
    pub fn execute(&self) -> Result<()> {
        let content = fs::read_to_string(&self.source)?;
        relocate(&self.source, &self.dest, &content)
    }
}

/// Create all intermediate destination directories, write `content` at the
/// new path, then delete the old path.
pub fn relocate(old: &Path, new: &Path, content: &str) -> Result<()> {
    if let Some(parent) = new.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(new, content)?;
    fs::remove_file(old)?;
    debug!(from = %old.display(), to = %new.display(), "relocated file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn moves_content_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("a.js");
        let new = dir.path().join("deeply/nested/a.js");
        fs::write(&old, "import './b';\n").unwrap();

        relocate(&old, &new, "import '../../b';\n").unwrap();

        assert!(!old.exists());
        assert_eq!(fs::read_to_string(&new).unwrap(), "import '../../b';\n");
    }

    #[test]
    fn execute_carries_the_current_on_disk_text() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("a.js");
        let new = dir.path().join("b.js");
        fs::write(&old, "original\n").unwrap();

        let pending = PendingRelocation {
            source: old.clone(),
            dest: new.clone(),
        };

        // The driver rewrites the old path before executing; the moved file
        // must contain that final text.
        fs::write(&old, "rewritten\n").unwrap();
        pending.execute().unwrap();

        assert!(!old.exists());
        assert_eq!(fs::read_to_string(&new).unwrap(), "rewritten\n");
    }
}
