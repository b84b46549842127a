//! Mapping resolution
//!
//! Turns the configured `{ sourcePattern: targetPattern }` table into a
//! concrete table of absolute source files to absolute destination files.
//! Glob sources are expanded eagerly against the filesystem snapshot at
//! resolution time; every destination ends in a filename component.

use crate::interpolate::interpolate;
use crate::paths::normalize_lexically;
use relink_core::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Concrete `absolute source file -> absolute destination file` table,
/// built once per batch and immutable afterward.
pub type ResolvedMapping = BTreeMap<PathBuf, PathBuf>;

/// Resolve the configured pattern table against `root`
///
/// Fails with [`Error::MultipleTargets`] or [`Error::FlatDirectory`] when a
/// pattern pair is ambiguous; both conflicts are detected from the pattern
/// strings alone, before any filesystem access. Entries whose expansions
/// collide on a source key keep the first mapping; entries that resolve to
/// their own current path are dropped.
pub fn resolve_mappings(files: &BTreeMap<String, String>, root: &Path) -> Result<ResolvedMapping> {
    for (source, target) in files {
        detect_conflict(source, target)?;
    }

    let mut mapping = ResolvedMapping::new();
    for (source, target) in files {
        if is_glob(source) {
            expand_glob_entry(source, target, root, &mut mapping)?;
        } else {
            let src = normalize_lexically(&absolutize(source, root));
            insert_first_wins(&mut mapping, src.clone(), resolve_destination(target, &src, root));
        }
    }

    debug!(entries = mapping.len(), "resolved move mapping");
    Ok(mapping)
}

fn detect_conflict(source: &str, target: &str) -> Result<()> {
    if !is_glob(source) {
        return Ok(());
    }
    if is_glob(&without_placeholders(target)) {
        return Err(Error::multiple_targets(source, target));
    }
    // A bare absolute directory would collapse every match into one flat
    // directory; a relative directory target preserves each match's own
    // directory structure and is supported.
    let trimmed = target.trim();
    if !trimmed.contains('{') && Path::new(trimmed).is_absolute() && looks_like_directory(trimmed) {
        return Err(Error::flat_directory(source, target));
    }
    Ok(())
}

fn expand_glob_entry(
    source: &str,
    target: &str,
    root: &Path,
    mapping: &mut ResolvedMapping,
) -> Result<()> {
    // Normalized so the expanded matches share the session root's prefix
    // with no `.` segments left in them.
    let pattern = normalize_lexically(&absolutize(source, root));
    let pattern = pattern.to_string_lossy();
    let matches = glob::glob(&pattern).map_err(|e| Error::pattern(format!("{source}: {e}")))?;

    for entry in matches {
        let path = entry.map_err(|e| Error::Io(e.into()))?;
        if !path.is_file() {
            continue;
        }
        let path = normalize_lexically(&path);
        let dest = resolve_destination(target, &path, root);
        insert_first_wins(mapping, path, dest);
    }
    Ok(())
}

fn insert_first_wins(mapping: &mut ResolvedMapping, source: PathBuf, dest: PathBuf) {
    if source == dest {
        return;
    }
    mapping.entry(source).or_insert(dest);
}

/// Compute the destination file for one concrete source file
///
/// The target pattern is interpolated against the source's own path; a
/// relative result is taken relative to the source file's directory. When
/// the result names a directory, the source's basename is appended.
fn resolve_destination(target: &str, source_abs: &Path, root: &Path) -> PathBuf {
    let interpolated = interpolate(target.trim(), source_abs, root);
    let candidate = Path::new(&interpolated);
    let mut dest = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        source_abs
            .parent()
            .unwrap_or_else(|| Path::new("/"))
            .join(candidate)
    };
    dest = normalize_lexically(&dest);
    if looks_like_directory(&interpolated) {
        if let Some(name) = source_abs.file_name() {
            dest.push(name);
        }
    }
    dest
}

/// Glob metacharacter check; `{query}` placeholders are not globs.
fn is_glob(pattern: &str) -> bool {
    pattern.chars().any(|c| matches!(c, '*' | '?' | '['))
}

/// Strip `{query}` placeholders so their contents are not mistaken for
/// glob metacharacters.
fn without_placeholders(target: &str) -> String {
    let mut out = String::with_capacity(target.len());
    let mut rest = target;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        match rest[open + 1..].find('}') {
            Some(close) => rest = &rest[open + 1 + close + 1..],
            None => {
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// A target with no extension on its final segment names a directory.
fn looks_like_directory(target: &str) -> bool {
    let trimmed = target.trim_end_matches('/');
    if trimmed.len() != target.len() {
        return true;
    }
    match trimmed.rsplit('/').next() {
        Some(segment) => !segment.contains('.') || matches!(segment, "." | ".."),
        None => true,
    }
}

fn absolutize(pattern: &str, root: &Path) -> PathBuf {
    let path = Path::new(pattern);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "").unwrap();
        path
    }

    fn pairs(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(s, t)| (s.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn literal_source_to_literal_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let src = touch(root, "src/rename-me.js");

        let mapping =
            resolve_mappings(&pairs(&[("./src/rename-me.js", "./renamed.js")]), root).unwrap();
        assert_eq!(mapping.get(&src), Some(&root.join("src/renamed.js")));
    }

    #[test]
    fn relative_target_resolves_against_source_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let src = touch(root, "src/lib/mod.js");

        let mapping = resolve_mappings(&pairs(&[("./src/lib/mod.js", "../mod.js")]), root).unwrap();
        assert_eq!(mapping.get(&src), Some(&root.join("src/mod.js")));
    }

    #[test]
    fn directory_target_appends_source_basename() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let a = touch(root, "a.js");
        let b = touch(root, "b.js");

        let mapping = resolve_mappings(&pairs(&[("./*.js", "./nested")]), root).unwrap();
        assert_eq!(mapping.get(&a), Some(&root.join("nested/a.js")));
        assert_eq!(mapping.get(&b), Some(&root.join("nested/b.js")));
    }

    #[test]
    fn file_target_sends_all_matches_to_the_same_destination() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let a = touch(root, "a.js");
        let b = touch(root, "b.js");

        // Overwrite semantics are the caller's responsibility, not
        // prevented here.
        let mapping = resolve_mappings(&pairs(&[("./*.js", "./nested/new-file.js")]), root).unwrap();
        assert_eq!(mapping.get(&a), Some(&root.join("nested/new-file.js")));
        assert_eq!(mapping.get(&b), Some(&root.join("nested/new-file.js")));
    }

    #[test]
    fn glob_target_interpolates_per_match() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let spec = touch(root, "src/lib/module.spec.js");

        let mapping = resolve_mappings(
            &pairs(&[("./src/**/*.spec.js", "{rootDir}/test/{..}/{name}.js")]),
            root,
        )
        .unwrap();
        assert_eq!(mapping.get(&spec), Some(&root.join("test/lib/module.js")));
    }

    #[test]
    fn multiple_targets_conflict_is_detected_before_expansion() {
        let dir = TempDir::new().unwrap();
        let err = resolve_mappings(
            &pairs(&[("./fake/dir/**/*.js", "./**/*.js")]),
            dir.path(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unclear where to move \"./fake/dir/**/*.js\" when target is \"./**/*.js\""
        );
    }

    #[test]
    fn flat_directory_conflict_is_detected_before_expansion() {
        let dir = TempDir::new().unwrap();
        let err = resolve_mappings(
            &pairs(&[("./fake/dir/**/*.js", "/fake/other-dir")]),
            dir.path(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Moving multiple files \"./fake/dir/**/*.js\" to a flat directory at \"/fake/other-dir\" is not currently supported"
        );
    }

    #[test]
    fn interpolated_absolute_directory_target_is_allowed() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let a = touch(root, "src/a.js");

        let mapping =
            resolve_mappings(&pairs(&[("./src/*.js", "{rootDir}/out/{dir}")]), root).unwrap();
        assert_eq!(mapping.get(&a), Some(&root.join("out/src/a.js")));
    }

    #[test]
    fn first_mapping_wins_on_collision() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let a = touch(root, "a.js");

        // BTreeMap iterates sorted, so "./*.js" is applied before "./a.js".
        let mapping = resolve_mappings(
            &pairs(&[("./*.js", "./nested"), ("./a.js", "./other.js")]),
            root,
        )
        .unwrap();
        assert_eq!(mapping.get(&a), Some(&root.join("nested/a.js")));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn self_mapping_entries_are_dropped() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "src/renamed.js");

        let mapping =
            resolve_mappings(&pairs(&[("./src/renamed.js", "./renamed.js")]), root).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn glob_expansion_snapshots_the_filesystem() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "a.js");

        let mapping = resolve_mappings(&pairs(&[("./*.js", "./nested")]), root).unwrap();

        // A file created after resolution is not part of the mapping.
        touch(root, "b.js");
        assert_eq!(mapping.len(), 1);
        assert!(!mapping.contains_key(&root.join("b.js")));
    }
}
