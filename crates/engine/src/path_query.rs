//! Path query resolution
//!
//! A path query is a selector string evaluated against an absolute file
//! path: whole components (`dir`, `base`, `name`, `ext`), indexed access
//! (`dirs.N`, `exts.N`, `ancestors.N`), and dot-run shorthand (`..` for the
//! parent directory name, `...` for the grandparent, and so on). Unknown
//! queries resolve to the empty string; resolution never fails.

use crate::paths::{lexical_relative, normalize_lexically};
use std::path::Path;

/// Evaluate `query` against `abs_path`, with `dir`/`dirs` computed relative
/// to `root`.
pub fn resolve_query(query: &str, abs_path: &Path, root: &Path) -> String {
    if query == "rootDir" {
        return root.display().to_string();
    }
    if query == "dir" {
        return dir_of(abs_path, root);
    }

    let base = abs_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if query == "base" || query == "." {
        return base.to_string();
    }

    // The extension chain starts at the first dot, so `.babelrc` has an
    // empty name and the extension `babelrc`, and `module.spec.js` has the
    // extension `spec.js`.
    let (name, ext) = match base.find('.') {
        Some(index) => (&base[..index], &base[index + 1..]),
        None => (base, ""),
    };
    if query == "name" {
        return name.to_string();
    }
    if query == "ext" {
        return ext.to_string();
    }

    if let Some(index) = query.strip_prefix("dirs.") {
        return indexed(index, &dir_segments(abs_path, root));
    }
    if let Some(index) = query.strip_prefix("exts.") {
        let exts: Vec<&str> = ext.split('.').filter(|s| !s.is_empty()).collect();
        return indexed(index, &exts);
    }
    if let Some(index) = query.strip_prefix("ancestors.") {
        return indexed(index, &ancestors(abs_path, root));
    }

    // A run of 2+ dots addresses ancestors: `..` is the immediate parent's
    // name, `...` the grandparent's, matching `ancestors.(dots - 2)`.
    if query.len() >= 2 && query.bytes().all(|b| b == b'.') {
        return indexed(&(query.len() - 2).to_string(), &ancestors(abs_path, root));
    }

    String::new()
}

/// Containing directory relative to the root, `/`-joined regardless of the
/// OS separator; empty for files directly under the root.
fn dir_of(abs_path: &Path, root: &Path) -> String {
    dir_segments(abs_path, root).join("/")
}

fn dir_segments<'a>(abs_path: &'a Path, root: &Path) -> Vec<String> {
    let parent = match abs_path.parent() {
        Some(parent) => parent.to_path_buf(),
        None => return Vec::new(),
    };
    let relative = lexical_relative(&normalize_lexically(root), &normalize_lexically(&parent));
    relative
        .components()
        .filter_map(|c| c.as_os_str().to_str().map(str::to_string))
        .collect()
}

/// Directory names walking upward from the immediate parent
fn ancestors(abs_path: &Path, root: &Path) -> Vec<String> {
    let mut segments = dir_segments(abs_path, root);
    segments.reverse();
    segments
}

fn indexed<S: AsRef<str>>(index: &str, values: &[S]) -> String {
    index
        .parse::<usize>()
        .ok()
        .and_then(|i| values.get(i))
        .map(|v| v.as_ref().to_string())
        .unwrap_or_default()
}
