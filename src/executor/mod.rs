//! Command execution module
//!
//! Provides the runner seam used by builders to spawn external tools.

pub mod runner;

#[cfg(test)]
pub use runner::MockCommandRunner;
pub use runner::{CommandRunner, CommandSpec, CommandStatus, SystemRunner};
