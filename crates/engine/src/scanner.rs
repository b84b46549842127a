//! Reference scanning over a parsed JavaScript file
//!
//! Finds every syntactic node that encodes a relative module reference:
//! static import statements (`import x from './dep'`, `import './dep'`) and
//! synchronous require calls (`require('./dep')`). Absolute and bare
//! specifiers are never candidates for rewriting and are not yielded.

use relink_core::error::{Error, Result};
use std::ops::Range;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

/// Closed set of syntactic forms that carry a module reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `import ... from '<literal>'` / `import '<literal>'`
    Import,
    /// `require('<literal>')`
    Require,
}

/// A relative module reference found in a file's source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReference {
    pub kind: ReferenceKind,
    /// The literal module identifier without quotes, e.g. `./dep`
    pub literal: String,
    /// Byte span of the string token, quotes included
    pub span: Range<usize>,
    /// Quote character of the original literal
    pub quote: char,
    /// Zero-based line of the string token
    pub line: usize,
    /// Zero-based column of the string token
    pub column: usize,
}

/// One pattern per reference form; the pattern index selects the
/// [`ReferenceKind`].
const REFERENCE_QUERY: &str = r#"
(import_statement
  source: (string) @source)

(call_expression
  function: (identifier) @callee
  arguments: (arguments . (string) @source .))
"#;

/// Scan a file's syntax tree for relative module references
///
/// The returned vector is in source order; rescanning the same source
/// yields the same references.
pub fn scan_references(source: &str, file: &Path) -> Result<Vec<ModuleReference>> {
    let language: tree_sitter::Language = tree_sitter_javascript::LANGUAGE.into();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| Error::parse(file.display().to_string(), e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::parse(file.display().to_string(), "tree-sitter produced no tree"))?;
    let query = Query::new(&language, REFERENCE_QUERY)
        .map_err(|e| Error::parse(file.display().to_string(), e.to_string()))?;

    let source_index = query.capture_index_for_name("source");
    let callee_index = query.capture_index_for_name("callee");

    let mut references = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

    while let Some(query_match) = matches.next() {
        let kind = match query_match.pattern_index {
            0 => ReferenceKind::Import,
            _ => ReferenceKind::Require,
        };

        if kind == ReferenceKind::Require {
            let callee = query_match
                .captures
                .iter()
                .find(|c| Some(c.index) == callee_index)
                .and_then(|c| c.node.utf8_text(source.as_bytes()).ok());
            if callee != Some("require") {
                continue;
            }
        }

        let Some(string_node) = query_match
            .captures
            .iter()
            .find(|c| Some(c.index) == source_index)
            .map(|c| c.node)
        else {
            continue;
        };
        let Ok(raw) = string_node.utf8_text(source.as_bytes()) else {
            continue;
        };
        if raw.len() < 2 {
            continue;
        }

        let quote = match raw.chars().next() {
            Some(q @ ('\'' | '"')) => q,
            _ => continue,
        };
        let literal = &raw[1..raw.len() - 1];
        if !literal.starts_with('.') {
            continue;
        }

        let position = string_node.start_position();
        references.push(ModuleReference {
            kind,
            literal: literal.to_string(),
            span: string_node.byte_range(),
            quote,
            line: position.row,
            column: position.column,
        });
    }

    Ok(references)
}
