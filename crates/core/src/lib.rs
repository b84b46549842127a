#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Shared types for the relink workspace
//!
//! This crate holds the error taxonomy, the rule configuration, and the
//! diagnostic model shared between the rewriting engine and the CLI driver.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod messages;

pub use config::MoveConfig;
pub use diagnostics::{Diagnostic, TextEdit};
pub use error::{Error, Result};
