//! build-all - build sibling projects and link their executables
//!
//! Walks a root directory and builds each project found there:
//! - **Cargo** - `cargo build --release`, binary in `target/release/<name>`
//! - **Makefile** - `make`, binary in `<name>`
//!
//! Each built executable is exposed through a symlink in the root's parent
//! directory. Builds run one at a time and the first failure stops the run.
//!
//! ## Features
//!
//! - Manifest-based detection with Cargo taking priority over Make
//! - XDG-compliant layered configuration
//! - Dry-run planning and JSON run reports
//! - A runner seam so builds can be exercised without real toolchains

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod publish;

pub use builder::{
    detect_builder, Builder, BuilderKind, CargoBuilder, DetectionResult, MakeBuilder,
};
pub use cli::{Cli, OutputFormat};
pub use config::Config;
pub use error::BuildError;
pub use executor::{CommandRunner, CommandSpec, CommandStatus, SystemRunner};
pub use orchestrator::{build_all, build_project, BuildPlan, ProjectOutcome, RunReport};
pub use publish::publish_executable;
