//! Blocking command execution
//!
//! Build tools run in the foreground with inherited stdio so their output
//! streams straight to the terminal. Only the exit status is inspected.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::BuildError;

/// A command line to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// The program to execute
    pub program: String,
    /// Command arguments
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
        }
    }

    /// Add arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Outcome of a finished command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code if available (None when killed by a signal)
    pub exit_code: Option<i32>,
    /// Wall-clock duration of the command
    pub duration: Duration,
}

impl CommandStatus {
    /// Whether the command succeeded (exit code 0)
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs external commands inside a given working directory
///
/// Builders only talk to this trait, so they never touch the process-wide
/// current directory and can be exercised without real build tools.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run `spec` with `dir` as working directory and wait for it to exit
    ///
    /// # Errors
    /// * `BuildError::SpawnFailed` - If the program is missing or cannot start
    fn run(&self, spec: &CommandSpec, dir: &Path) -> Result<CommandStatus, BuildError>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec, dir: &Path) -> Result<CommandStatus, BuildError> {
        let command_str = spec.to_string();

        // Resolve against PATH up front for a clearer error than ENOENT
        let program = which::which(&spec.program).map_err(|e| BuildError::SpawnFailed {
            command: command_str.clone(),
            error: e.to_string(),
        })?;

        tracing::debug!("Executing: {} in {}", command_str, dir.display());

        let start = Instant::now();
        let status = Command::new(program)
            .args(&spec.args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| BuildError::SpawnFailed {
                command: command_str.clone(),
                error: e.to_string(),
            })?;
        let duration = start.elapsed();

        tracing::debug!(
            "{} exited with {:?} after {}ms",
            command_str,
            status.code(),
            duration.as_millis()
        );

        Ok(CommandStatus {
            exit_code: status.code(),
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_spec_display() {
        let spec = CommandSpec::new("cargo").with_args(["build", "--release"]);
        assert_eq!(spec.to_string(), "cargo build --release");
        assert_eq!(CommandSpec::new("make").to_string(), "make");
    }

    #[test]
    fn test_command_status_success() {
        let ok = CommandStatus {
            exit_code: Some(0),
            duration: Duration::ZERO,
        };
        let failed = CommandStatus {
            exit_code: Some(2),
            duration: Duration::ZERO,
        };
        let signalled = CommandStatus {
            exit_code: None,
            duration: Duration::ZERO,
        };

        assert!(ok.success());
        assert!(!failed.success());
        assert!(!signalled.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_success() {
        let dir = TempDir::new().unwrap();
        let status = SystemRunner::new()
            .run(&CommandSpec::new("true"), dir.path())
            .unwrap();

        assert!(status.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_failure() {
        let dir = TempDir::new().unwrap();
        let status = SystemRunner::new()
            .run(&CommandSpec::new("false"), dir.path())
            .unwrap();

        assert!(!status.success());
        assert_ne!(status.exit_code, Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_working_dir() {
        let dir = TempDir::new().unwrap();
        let spec = CommandSpec::new("sh").with_args(["-c", "touch created-here"]);

        let status = SystemRunner::new().run(&spec, dir.path()).unwrap();

        assert!(status.success());
        assert!(dir.path().join("created-here").exists());
    }

    #[test]
    fn test_system_runner_spawn_failed() {
        let dir = TempDir::new().unwrap();
        let spec = CommandSpec::new("nonexistent_command_12345");
        let result = SystemRunner::new().run(&spec, dir.path());

        match result {
            Err(BuildError::SpawnFailed { command, .. }) => {
                assert!(command.contains("nonexistent_command_12345"));
            }
            other => panic!("Expected SpawnFailed error, got {:?}", other),
        }
    }
}
