//! relink - move files around while keeping imports up to date
//!
//! This binary is the batch driver: it loads the mapping configuration,
//! discovers (or accepts) the files to process, runs each one through the
//! rewriting engine, and either reports what would change (`check`) or
//! applies the rewrites and relocations (`apply`).

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relink::{discover_files, driver};
use relink_core::MoveConfig;
use relink_engine::MoveSession;
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "relink")]
#[command(about = "Move files around while keeping imports up to date")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (TOML or JSON)
    #[arg(short, long, value_name = "FILE", default_value = "relink.toml", global = true)]
    config: PathBuf,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report every move and reference rewrite without touching the disk
    Check {
        /// Files to process; defaults to every JavaScript file under the root
        paths: Vec<PathBuf>,
    },
    /// Apply reference rewrites and physically relocate files
    Apply {
        /// Files to process; defaults to every JavaScript file under the root
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check { paths } => run(&cli.config, paths, false),
        Commands::Apply { paths } => run(&cli.config, paths, true),
    }
}

fn run(config_path: &Path, paths: Vec<PathBuf>, apply: bool) -> Result<()> {
    let config = MoveConfig::from_file(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let working_dir = env::current_dir().context("failed to get current directory")?;
    let mut session = MoveSession::new(&config, &working_dir)?;

    let files = if paths.is_empty() {
        discover_files(session.root())
    } else {
        paths
    };
    info!(files = files.len(), apply, "processing batch");

    let root = session.root().to_path_buf();
    let outcome = driver::run_batch(&mut session, &files, apply)?;

    print!("{}", driver::render_report(&outcome, &root));
    let count = outcome.diagnostic_count();
    if apply {
        info!(diagnostics = count, "batch applied");
    } else if count > 0 {
        // Lint-failure semantics: pending moves mean a non-zero exit.
        std::process::exit(1);
    }
    Ok(())
}

/// Initialize logging system
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("relink={level}"))
        .with_writer(std::io::stderr)
        .init();
}
