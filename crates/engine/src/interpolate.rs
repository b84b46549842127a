//! `{query}` template interpolation
//!
//! Destination patterns may embed path queries in braces, e.g.
//! `{rootDir}/test/{..}/{name}.js`. Each placeholder is replaced by the
//! query's value for the file being moved. Placeholders never nest and may
//! not contain commas; anything that does not form a valid placeholder is
//! left verbatim.

use crate::path_query::resolve_query;
use std::path::Path;

/// Expand every `{query}` placeholder in `template` against `abs_path`
///
/// Pure: the output depends only on the arguments. Idempotent once the
/// result contains no further placeholders.
pub fn interpolate(template: &str, abs_path: &Path, root: &Path) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if close > 0 && !after[..close].contains(',') => {
                out.push_str(&resolve_query(&after[..close], abs_path, root));
                rest = &after[close + 1..];
            }
            _ => {
                // Empty, comma-bearing, or unterminated braces stay verbatim.
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
