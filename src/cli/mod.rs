//! CLI module for build-all
//!
//! Flags and output formats for the single `build-all` command.

pub mod commands;

pub use commands::{Cli, OutputFormat};
