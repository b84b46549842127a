//! Diagnostic model shared between the engine and the driver
//!
//! A diagnostic mirrors what the original lint host reported for this rule:
//! a human-readable message, the location of the offending node, and zero or
//! more attached fixes (replacement text spans).

use serde::Serialize;
use std::ops::Range;

/// A single replacement of a byte span in a file's source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Byte range in the original source, quotes included for reference
    /// literals
    pub span: Range<usize>,
    /// Replacement text, quoted the same way the original literal was
    pub replacement: String,
}

impl TextEdit {
    pub fn new(span: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }
}

/// One reported finding for a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Human-readable message, e.g. `./old.js has moved to ./new.js`
    pub message: String,
    /// Zero-based line of the node this diagnostic is attributed to
    pub line: usize,
    /// Zero-based column of the node this diagnostic is attributed to
    pub column: usize,
    /// Fixes to apply to the file's source text; empty for report-only
    /// diagnostics such as configuration errors
    pub fixes: Vec<TextEdit>,
}

impl Diagnostic {
    /// A diagnostic attributed to the start of the file with no fix
    pub fn at_file_start(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: 0,
            column: 0,
            fixes: Vec::new(),
        }
    }

    /// A diagnostic at a node location carrying fixes
    pub fn with_fixes(
        message: impl Into<String>,
        line: usize,
        column: usize,
        fixes: Vec<TextEdit>,
    ) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            fixes,
        }
    }
}
