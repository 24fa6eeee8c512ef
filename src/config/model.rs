//! Configuration model for build-all
//!
//! Defines the structure for XDG-compliant layered configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Directory whose entries are built (defaults to the executable's directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Directory receiving the symlinks (defaults to the root's parent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_dir: Option<String>,

    /// Root entry names that are ignored without a warning
    #[serde(default)]
    pub skip: Vec<String>,

    /// Build tool configuration
    #[serde(default)]
    pub builders: BuildersConfig,
}

/// Builder-specific configurations
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct BuildersConfig {
    #[serde(default)]
    pub cargo: CargoConfig,

    #[serde(default)]
    pub make: MakeConfig,
}

/// Cargo builder configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CargoConfig {
    /// Command to execute cargo
    #[serde(default = "default_cargo_command")]
    pub command: String,

    /// Arguments passed to the command
    #[serde(default = "default_cargo_args")]
    pub args: Vec<String>,

    /// Directory under `target/` holding the built executable
    #[serde(default = "default_profile_dir")]
    pub profile_dir: String,
}

fn default_cargo_command() -> String {
    "cargo".to_string()
}

fn default_cargo_args() -> Vec<String> {
    vec!["build".to_string(), "--release".to_string()]
}

fn default_profile_dir() -> String {
    "release".to_string()
}

impl Default for CargoConfig {
    fn default() -> Self {
        Self {
            command: default_cargo_command(),
            args: default_cargo_args(),
            profile_dir: default_profile_dir(),
        }
    }
}

/// Makefile builder configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct MakeConfig {
    /// Command to execute make
    #[serde(default = "default_make_command")]
    pub command: String,

    /// Arguments passed to the command (empty runs the default target)
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_make_command() -> String {
    "make".to_string()
}

impl Default for MakeConfig {
    fn default() -> Self {
        Self {
            command: default_make_command(),
            args: vec![],
        }
    }
}

impl Config {
    /// Resolve the root directory to an absolute path
    ///
    /// Falls back to the directory containing the running executable.
    pub fn resolve_root(&self) -> Result<PathBuf, BuildError> {
        let root = match &self.root {
            Some(root) => expand_path(root)?,
            None => {
                let exe = std::env::current_exe()?;
                exe.parent()
                    .map(Path::to_path_buf)
                    .ok_or_else(|| BuildError::Config("executable has no parent directory".into()))?
            }
        };

        root.canonicalize().map_err(|e| {
            BuildError::Config(format!("cannot resolve root {}: {}", root.display(), e))
        })
    }

    /// Resolve the link directory for a given root
    ///
    /// The configured path is used verbatim after expansion; it need not exist.
    pub fn resolve_link_dir(&self, root: &Path) -> Result<PathBuf, BuildError> {
        match &self.link_dir {
            Some(dir) => expand_path(dir),
            None => root.parent().map(Path::to_path_buf).ok_or_else(|| {
                BuildError::Config(format!("root {} has no parent directory", root.display()))
            }),
        }
    }
}

/// Expand `~` and environment variables in a configured path
fn expand_path(raw: &str) -> Result<PathBuf, BuildError> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| BuildError::Config(format!("cannot expand path '{}': {}", raw, e)))
}
