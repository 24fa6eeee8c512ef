//! CLI definition using clap
//!
//! Every flag is optional; a bare `build-all` builds the directory holding
//! the executable.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Build every Cargo or Make project in a directory and link the
/// executables into its parent.
///
/// Each subdirectory of ROOT is built with `cargo build --release` when it
/// has a Cargo.toml, or `make` when it has a Makefile. The first failure
/// stops the run with exit status 1.
#[derive(Parser, Debug)]
#[command(name = "build-all")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the projects (defaults to the executable's directory)
    pub root: Option<PathBuf>,

    /// Directory receiving the symlinks (defaults to ROOT's parent)
    #[arg(short, long)]
    pub link_dir: Option<PathBuf>,

    /// Config file path (layered over the default XDG paths)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show what would be built and linked without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Format of the summary printed after a successful run
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON output
    Json,
    /// Plain text (one link per line)
    Plain,
}
