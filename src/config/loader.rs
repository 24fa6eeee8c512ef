//! Configuration loader with XDG-compliant path resolution
//!
//! Loads configuration from multiple locations with layered priority:
//! 1. `/etc/build-all/config.toml` (lowest priority)
//! 2. `~/.config/build-all/config.toml`
//! 3. `~/.build-all.toml`
//! 4. `./.build-all.toml` (highest priority)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::Config;

/// Application name used for XDG directories
const APP_NAME: &str = "build-all";

/// Prefix for environment variable overrides
const ENV_PREFIX: &str = "BUILD_ALL_";

/// Get XDG config search paths in priority order (lowest to highest)
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from(format!("/etc/{}/config.toml", APP_NAME)));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_NAME).join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{}.toml", APP_NAME)));
    }

    paths.push(PathBuf::from(format!(".{}.toml", APP_NAME)));

    paths
}

/// Load configuration with XDG layering
///
/// Configurations are merged in priority order, with later files
/// overriding earlier ones. Environment variables with prefix
/// `BUILD_ALL_` override all file-based configuration.
pub fn load_config(override_path: Option<&Path>) -> Result<Config> {
    figment(override_path)
        .extract()
        .context("Failed to load configuration")
}

/// Assemble the layered figment without extracting it
fn figment(override_path: Option<&Path>) -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

    for path in config_paths() {
        if path.exists() {
            tracing::debug!("Loading config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }
    }

    if let Some(path) = override_path {
        if path.exists() {
            tracing::debug!("Loading override config from: {}", path.display());
            figment = figment.merge(Toml::file(path));
        } else {
            tracing::warn!("Override config not found: {}", path.display());
        }
    }

    // BUILD_ALL_BUILDERS__MAKE__COMMAND=gmake maps to builders.make.command
    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}
