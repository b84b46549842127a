//! The batch driver
//!
//! Runs a whole batch through the engine with an explicit two-phase
//! commit: phase one processes every file and, in apply mode, writes the
//! rewritten text back at each file's current path; phase two executes the
//! physical relocations. That ordering guarantees every moved file carries
//! its post-rewrite text, and that consumers were still able to resolve
//! moved sources while the batch was being processed.

use relink_core::diagnostics::TextEdit;
use relink_core::error::Result;
use relink_engine::{FileReport, MoveSession, PendingRelocation};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The engine's report for one file, keyed by the path the driver read
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub report: FileReport,
}

/// Everything one batch produced
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchOutcome {
    /// Total number of diagnostics across the batch
    pub fn diagnostic_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.report.diagnostics.len()).sum()
    }
}

/// Process `files` against the session
///
/// With `apply` set, fixes are written back to disk and relocations are
/// executed once phase one has finished; otherwise the batch is
/// report-only and the filesystem is left untouched.
pub fn run_batch(session: &mut MoveSession, files: &[PathBuf], apply: bool) -> Result<BatchOutcome> {
    let mut outcomes = Vec::with_capacity(files.len());
    let mut pending: Vec<PendingRelocation> = Vec::new();

    for path in files {
        // Relative paths mean root-relative, matching how the session
        // resolves them, rather than wherever the process happens to run.
        let path = if path.is_absolute() {
            path.clone()
        } else {
            session.root().join(path)
        };
        let source = fs::read_to_string(&path)?;
        let report = session.process_file(&path, &source)?;
        debug!(
            file = %path.display(),
            diagnostics = report.diagnostics.len(),
            moving = report.relocation.is_some(),
            "processed file"
        );

        if apply {
            let edits: Vec<&TextEdit> = report
                .diagnostics
                .iter()
                .flat_map(|d| d.fixes.iter())
                .collect();
            if !edits.is_empty() {
                fs::write(&path, apply_edits(&source, edits))?;
            }
            if let Some(relocation) = &report.relocation {
                pending.push(relocation.clone());
            }
        }

        outcomes.push(FileOutcome { path, report });
    }

    // Phase two: every rewrite is on disk, now move the bytes.
    for relocation in pending {
        relocation.execute()?;
    }

    Ok(BatchOutcome { outcomes })
}

/// Splice replacement spans into the source, right to left so earlier
/// spans stay valid.
fn apply_edits(source: &str, mut edits: Vec<&TextEdit>) -> String {
    edits.sort_by(|a, b| b.span.start.cmp(&a.span.start));
    let mut out = source.to_string();
    for edit in edits {
        out.replace_range(edit.span.clone(), &edit.replacement);
    }
    out
}

/// Render a batch outcome as lint-style lines, paths relative to `root`
pub fn render_report(outcome: &BatchOutcome, root: &Path) -> String {
    let mut out = String::new();
    for file in &outcome.outcomes {
        for diagnostic in &file.report.diagnostics {
            out.push_str(&format!(
                "{}:{}:{}: {}\n",
                relink_engine::display_relative(root, &file.path),
                diagnostic.line + 1,
                diagnostic.column + 1,
                diagnostic.message
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use relink_core::config::MoveConfig;
    use tempfile::TempDir;

    #[test]
    fn relative_paths_resolve_against_the_session_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/rename-me.js"), "").unwrap();
        fs::write(root.join("src/consumer.js"), "import './rename-me';\n").unwrap();

        // The root is nowhere near the process working directory, so a
        // root-relative path only reads if the driver joins it itself.
        let mut config = MoveConfig::from_pairs([("./src/rename-me.js", "./renamed.js")]);
        config.root_dir = Some(root.to_path_buf());
        let mut session = MoveSession::new(&config, Path::new("/nonexistent")).unwrap();

        let outcome =
            run_batch(&mut session, &[PathBuf::from("src/consumer.js")], false).unwrap();
        assert_eq!(outcome.diagnostic_count(), 1);
        assert_eq!(outcome.outcomes[0].path, root.join("src/consumer.js"));
    }

    #[test]
    fn edits_apply_right_to_left() {
        let source = "import './a';\nimport './b';\n";
        let edits = [
            TextEdit::new(7..12, "'./x'"),
            TextEdit::new(21..26, "'./y'"),
        ];
        let applied = apply_edits(source, edits.iter().collect());
        assert_eq!(applied, "import './x';\nimport './y';\n");
    }
}
