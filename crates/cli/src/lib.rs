#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Batch driver for relink
//!
//! The library half of the CLI: file discovery plus the per-batch driver
//! that feeds files to the engine, applies text fixes, and executes
//! physical relocations in the order the engine's contract requires.

pub mod discover;
pub mod driver;

pub use discover::discover_files;
pub use driver::{run_batch, BatchOutcome, FileOutcome};
