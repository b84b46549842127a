//! User-visible message text
//!
//! Every diagnostic the engine emits is built here so the wording stays
//! identical between the engine, the CLI output, and the tests.

/// Reported once per processed file when the rule configuration contains
/// no file mappings at all.
pub const ERROR_NO_FILES: &str = r#"Config "files" must include at least one source to destination mapping, e.g. { "./old.js": "./new.js" }"#;

/// The message attached to every moved file and every rewritten reference.
pub fn moved_message(old_path: &str, new_path: &str) -> String {
    format!("{old_path} has moved to {new_path}")
}
