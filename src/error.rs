//! Error types for build-all
//!
//! Every variant except the ones produced while entering a root entry is
//! fatal to the whole run. Errors carry enough context to print a hint.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for build and publish operations
#[derive(Error, Debug)]
pub enum BuildError {
    /// Neither a Cargo nor a Make manifest was found
    #[error("cannot build: unknown project type {}", .path.display())]
    UnknownProjectType { path: PathBuf },

    /// Project path has no final component to name the executable after
    #[error("cannot build: invalid project directory {}", .path.display())]
    InvalidProject { path: PathBuf },

    /// External build command exited unsuccessfully
    #[error("cannot build: command failed: {command} in {} (exit code {})", .path.display(), display_code(.exit_code))]
    CommandFailed {
        command: String,
        path: PathBuf,
        exit_code: Option<i32>,
    },

    /// Failed to spawn the build command
    #[error("cannot build: failed to spawn command: {command}: {error}")]
    SpawnFailed { command: String, error: String },

    /// Symlink removal or creation failed
    #[error("cannot link executable {} -> {}: {source}", .link.display(), .target.display())]
    Link {
        link: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none, terminated by signal".to_string(),
    }
}

impl BuildError {
    /// Suggest a fix for the error, if one is obvious
    pub fn suggestion(&self) -> Option<String> {
        match self {
            BuildError::UnknownProjectType { path } => Some(format!(
                "Add a Cargo.toml or Makefile to {}, or list it under `skip` in the config",
                path.display()
            )),
            BuildError::InvalidProject { .. } => None,
            BuildError::CommandFailed { command, .. } => {
                Some(format!("Run `{}` in the project to see the full build output", command))
            }
            BuildError::SpawnFailed { command, .. } => {
                if command.starts_with("make") {
                    Some("'make' command not found. Install build-essential or make.".to_string())
                } else if command.starts_with("cargo") {
                    Some("'cargo' command not found. Install Rust via rustup.".to_string())
                } else {
                    Some("Required command not found. Check PATH and dependencies.".to_string())
                }
            }
            BuildError::Link { link, source, .. } => match source.kind() {
                std::io::ErrorKind::AlreadyExists => Some(format!(
                    "{} exists and is not a symlink. Move it out of the way.",
                    link.display()
                )),
                std::io::ErrorKind::PermissionDenied => Some(format!(
                    "Permission denied. Check write access to {}",
                    link.parent().unwrap_or(link).display()
                )),
                _ => None,
            },
            BuildError::Config(_) => {
                Some("Check your build-all configuration file".to_string())
            }
            BuildError::Io(_) => None,
        }
    }
}
