//! Reference rewriting
//!
//! Two mutually exclusive modes per file, selected by whether the file's
//! own path is a key of the resolved mapping:
//!
//! - a moving file recomputes its own relative references against its new
//!   directory and carries a single "has moved" diagnostic whose fixes hold
//!   every rewrite, plus the pending physical relocation;
//! - a staying file gets one diagnostic per reference that points at a
//!   moved file, each with the fix rewriting that reference from the file's
//!   own (unchanged) directory.

use crate::mapping::ResolvedMapping;
use crate::paths::{display_relative, normalize_lexically, relative_specifier};
use crate::relocate::PendingRelocation;
use crate::scanner::ModuleReference;
use crate::session::FileReport;
use relink_core::diagnostics::{Diagnostic, TextEdit};
use relink_core::messages::moved_message;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a reference literal to an absolute module path
///
/// Extension-resolution fallback: the joined path as written, then with the
/// default `.js` appended. A candidate counts when it is a mapping key
/// (sources keep resolving mid-batch even once physically moved) or an
/// existing file. `None` means the reference is unresolvable and must be
/// left alone.
fn resolve_module(dir: &Path, literal: &str, mapping: &ResolvedMapping) -> Option<PathBuf> {
    let joined = normalize_lexically(&dir.join(literal));
    let with_default_ext = PathBuf::from(format!("{}.js", joined.display()));

    [joined, with_default_ext]
        .into_iter()
        .find(|candidate| mapping.contains_key(candidate) || candidate.is_file())
}

/// Mode A: the file itself is moving to `dest`
pub(crate) fn moving_file_report(
    abs: &Path,
    dest: &Path,
    references: &[ModuleReference],
    mapping: &ResolvedMapping,
    root: &Path,
) -> FileReport {
    let old_dir = parent_of(abs);
    let new_dir = parent_of(dest);
    let same_dir = old_dir == new_dir;

    let mut fixes = Vec::new();
    for reference in references {
        let Some(module) = resolve_module(&old_dir, &reference.literal, mapping) else {
            debug!(literal = %reference.literal, file = %abs.display(), "unresolvable reference, skipping");
            continue;
        };
        let moved_target = mapping.get(&module);

        // A move within the same directory leaves references to unmoved
        // siblings valid as written.
        if same_dir && moved_target.is_none() {
            continue;
        }

        let target = moved_target.cloned().unwrap_or(module);
        let replacement = relative_specifier(&new_dir, &target);
        if replacement != reference.literal {
            fixes.push(TextEdit::new(
                reference.span.clone(),
                quoted(&replacement, reference.quote),
            ));
        }
    }

    let message = moved_message(
        &display_relative(root, abs),
        &display_relative(root, dest),
    );
    FileReport {
        diagnostics: vec![Diagnostic::with_fixes(message, 0, 0, fixes)],
        relocation: Some(PendingRelocation {
            source: abs.to_path_buf(),
            dest: dest.to_path_buf(),
        }),
    }
}

/// Mode B: the file stays put but may reference moved files
pub(crate) fn consumer_report(
    abs: &Path,
    references: &[ModuleReference],
    mapping: &ResolvedMapping,
    root: &Path,
) -> FileReport {
    let dir = parent_of(abs);

    let mut diagnostics = Vec::new();
    for reference in references {
        let Some(module) = resolve_module(&dir, &reference.literal, mapping) else {
            continue;
        };
        let Some(new_path) = mapping.get(&module) else {
            continue;
        };

        let replacement = relative_specifier(&dir, new_path);
        if replacement == reference.literal {
            continue;
        }
        diagnostics.push(Diagnostic::with_fixes(
            moved_message(
                &display_relative(root, &module),
                &display_relative(root, new_path),
            ),
            reference.line,
            reference.column,
            vec![TextEdit::new(
                reference.span.clone(),
                quoted(&replacement, reference.quote),
            )],
        ));
    }

    FileReport {
        diagnostics,
        relocation: None,
    }
}

fn quoted(literal: &str, quote: char) -> String {
    format!("{quote}{literal}{quote}")
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent().unwrap_or_else(|| Path::new("/")).to_path_buf()
}
