//! Default file discovery
//!
//! When the user passes no explicit paths, the driver lints every
//! JavaScript source under the root, skipping dependency and VCS
//! directories the way any lint host would.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extensions treated as JavaScript sources
const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs"];

/// Collect every JavaScript file under `root`, sorted for deterministic
/// batch order.
pub fn discover_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry))
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file() && is_source_file(entry.path()))
        .map(DirEntry::into_path)
        .collect();
    files.sort();
    files
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn is_ignored(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name == "node_modules" || name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn finds_sources_and_skips_ignored_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("a.js"), "").unwrap();
        fs::write(root.join("src/b.mjs"), "").unwrap();
        fs::write(root.join("src/notes.md"), "").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "").unwrap();
        fs::write(root.join(".git/hook.js"), "").unwrap();

        let files = discover_files(root);
        assert_eq!(files, vec![root.join("a.js"), root.join("src/b.mjs")]);
    }
}
