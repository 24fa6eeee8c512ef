//! Cargo builder implementation
//!
//! Runs a release build and picks the binary named after the project
//! directory out of `target/release/`.

use std::path::{Path, PathBuf};

use super::traits::{project_name, BuildResult, Builder};
use crate::config::CargoConfig;
use crate::executor::CommandSpec;

/// Manifest that marks a Cargo project
pub const CARGO_MANIFEST: &str = "Cargo.toml";

/// Builder for Cargo projects
#[derive(Debug, Clone)]
pub struct CargoBuilder {
    config: CargoConfig,
}

impl Default for CargoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CargoBuilder {
    /// Create a new Cargo builder using `cargo build --release`
    pub fn new() -> Self {
        Self {
            config: CargoConfig::default(),
        }
    }

    /// Create a Cargo builder from configuration
    pub fn with_config(config: CargoConfig) -> Self {
        Self { config }
    }
}

impl Builder for CargoBuilder {
    fn name(&self) -> &str {
        "cargo"
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(&self.config.command).with_args(&self.config.args)
    }

    fn executable_path(&self, dir: &Path) -> BuildResult<PathBuf> {
        let mut name = project_name(dir)?.to_os_string();
        name.push(std::env::consts::EXE_SUFFIX);

        Ok(dir
            .join("target")
            .join(&self.config.profile_dir)
            .join(name))
    }
}
