//! Build system auto-detection
//!
//! Detects which build system a project uses by checking, in order, for:
//! - Cargo.toml (cargo)
//! - Makefile (make)

use std::path::Path;

use serde::Serialize;

use super::cargo::{CargoBuilder, CARGO_MANIFEST};
use super::make::{MakeBuilder, MAKE_MANIFEST};
use super::traits::Builder;
use crate::config::BuildersConfig;

/// Type of build system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuilderKind {
    /// Cargo with Cargo.toml
    Cargo,
    /// GNU Make with Makefile
    Make,
}

impl BuilderKind {
    /// All kinds in detection priority order
    pub const PRIORITY: [BuilderKind; 2] = [BuilderKind::Cargo, BuilderKind::Make];

    /// Get the manifest filename for this kind
    pub fn manifest(&self) -> &'static str {
        match self {
            BuilderKind::Cargo => CARGO_MANIFEST,
            BuilderKind::Make => MAKE_MANIFEST,
        }
    }

    /// Create the builder for this kind
    pub fn builder(&self, config: &BuildersConfig) -> Box<dyn Builder> {
        match self {
            BuilderKind::Cargo => Box::new(CargoBuilder::with_config(config.cargo.clone())),
            BuilderKind::Make => Box::new(MakeBuilder::with_config(config.make.clone())),
        }
    }
}

impl std::fmt::Display for BuilderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuilderKind::Cargo => write!(f, "cargo"),
            BuilderKind::Make => write!(f, "make"),
        }
    }
}

/// Result of build system detection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionResult {
    /// The detected builder (first match by priority)
    pub detected: Option<BuilderKind>,
    /// Every manifest present in the directory
    pub available: Vec<BuilderKind>,
}

/// Detect which build system a project uses
///
/// Only the presence of the manifest is checked; its contents are never read.
pub fn detect_builder(dir: &Path) -> DetectionResult {
    let mut result = DetectionResult::default();

    for kind in BuilderKind::PRIORITY {
        if dir.join(kind.manifest()).is_file() {
            result.available.push(kind);
            if result.detected.is_none() {
                result.detected = Some(kind);
            }
        }
    }

    result
}
