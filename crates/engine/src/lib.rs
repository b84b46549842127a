#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Mapping resolution and reference rewriting for file moves
//!
//! This crate implements the core of relink: turning a declarative
//! `{ sourcePattern: targetPattern }` table into a concrete
//! source-to-destination mapping, scanning JavaScript files for relative
//! `import`/`require` references, and computing the text rewrites that keep
//! those references valid when files move.
//!
//! The driver owns a [`MoveSession`] per batch and calls
//! [`MoveSession::process_file`] once per file. The returned [`FileReport`]
//! carries diagnostics with attached fixes plus an optional
//! [`PendingRelocation`]; the driver applies the fixes to the file at its
//! old path first, and only then executes the relocation, so the relocated
//! file always contains the post-rewrite text.

mod interpolate;
mod mapping;
mod path_query;
mod paths;
mod relocate;
mod rewriter;
mod scanner;
mod session;

pub use interpolate::interpolate;
pub use mapping::{resolve_mappings, ResolvedMapping};
pub use path_query::resolve_query;
pub use paths::display_relative;
pub use relocate::{relocate, PendingRelocation};
pub use scanner::{scan_references, ModuleReference, ReferenceKind};
pub use session::{FileReport, MoveSession};
