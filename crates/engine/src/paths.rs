//! Lexical path algebra shared by the mapping resolver and the rewriter
//!
//! All of relink's path math is lexical: `.` and `..` segments are resolved
//! without touching the filesystem, so the same computations hold for paths
//! that no longer exist (a moved file's old location) or do not exist yet
//! (its destination).

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// File extensions that module specifiers omit by convention
const MODULE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs"];

/// Resolve `.` and `..` segments lexically
///
/// `..` at the root of an absolute path is clamped; leading `..` segments of
/// a relative path are preserved.
pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut prefix = PathBuf::new();
    let mut rooted = false;
    let mut segments: Vec<OsString> = Vec::new();
    let mut leading_parents = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(p) => prefix.push(p.as_os_str()),
            Component::RootDir => rooted = true,
            Component::CurDir => {}
            Component::ParentDir => {
                if segments.pop().is_none() && !rooted {
                    leading_parents += 1;
                }
            }
            Component::Normal(segment) => segments.push(segment.to_os_string()),
        }
    }

    let mut out = prefix;
    if rooted {
        out.push(Component::RootDir.as_os_str());
    }
    for _ in 0..leading_parents {
        out.push("..");
    }
    for segment in segments {
        out.push(segment);
    }
    out
}

/// Compute the lexical relative path from a directory to a target
///
/// Both paths must be absolute and already normalized. Returns an empty
/// path when `target` equals `base`.
pub(crate) fn lexical_relative(base: &Path, target: &Path) -> PathBuf {
    let base_components: Vec<Component> = base.components().collect();
    let target_components: Vec<Component> = target.components().collect();

    let mut shared = 0;
    while shared < base_components.len()
        && shared < target_components.len()
        && base_components[shared] == target_components[shared]
    {
        shared += 1;
    }

    let mut out = PathBuf::new();
    for _ in shared..base_components.len() {
        out.push("..");
    }
    for component in &target_components[shared..] {
        out.push(component.as_os_str());
    }
    out
}

/// Render a path relative to the session root with a leading `./`
///
/// This is the form every diagnostic message uses, e.g.
/// `./src/rename-me.js`.
pub fn display_relative(root: &Path, path: &Path) -> String {
    let relative = lexical_relative(root, path);
    let joined = join_segments(&relative);
    if joined.is_empty() {
        ".".to_string()
    } else if joined.starts_with("..") {
        joined
    } else {
        format!("./{joined}")
    }
}

/// Compute the specifier text for a reference from `from_dir` to `to_file`
///
/// The known module extension is stripped and a leading `./` is enforced
/// unless the path already climbs with `../`.
pub(crate) fn relative_specifier(from_dir: &Path, to_file: &Path) -> String {
    let relative = lexical_relative(from_dir, to_file);
    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|c| c.as_os_str().to_str().map(str::to_string))
        .collect();

    if let Some(last) = segments.last_mut() {
        *last = strip_module_extension(last).to_string();
    }

    let joined = segments.join("/");
    if joined.starts_with("..") {
        joined
    } else {
        format!("./{joined}")
    }
}

/// Remove the final extension when it is a known module extension
///
/// `renamed.js` -> `renamed`, `module.spec.js` -> `module.spec`, but
/// `file.config` stays as-is since `.config` is data, not an extension.
pub(crate) fn strip_module_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() && MODULE_EXTENSIONS.contains(&ext) => base,
        _ => name,
    }
}

fn join_segments(path: &Path) -> String {
    path.components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/")
}
