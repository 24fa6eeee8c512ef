//! Builder module for build system detection and execution
//!
//! Provides auto-detection and release builds for:
//! - Cargo (Cargo.toml)
//! - Makefile (make)

pub mod cargo;
pub mod detect;
pub mod make;
pub mod traits;

pub use cargo::CargoBuilder;
pub use detect::*;
pub use make::MakeBuilder;
pub use traits::*;
