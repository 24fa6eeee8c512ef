//! Common trait for build strategies
//!
//! Defines the interface that the Cargo and Make builders implement.

use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::executor::{CommandRunner, CommandSpec};

/// Result type for builder operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Trait for build strategies
///
/// A builder knows which command builds its projects and where that
/// command leaves the executable.
pub trait Builder {
    /// Get the name of this builder (e.g., "cargo", "make")
    fn name(&self) -> &str;

    /// The command line this builder runs
    fn command(&self) -> CommandSpec;

    /// Conventional location of the built executable
    ///
    /// `dir` must be absolute; the returned path is not checked for existence.
    ///
    /// # Errors
    /// * `BuildError::InvalidProject` - If `dir` has no final component
    fn executable_path(&self, dir: &Path) -> BuildResult<PathBuf>;

    /// Build the project in `dir` and return the executable path
    ///
    /// # Errors
    /// * `BuildError::SpawnFailed` - If the tool cannot be started
    /// * `BuildError::CommandFailed` - If the tool exits unsuccessfully
    fn build(&self, dir: &Path, runner: &dyn CommandRunner) -> BuildResult<PathBuf> {
        tracing::info!("building {} {:?}", self.name(), dir.display().to_string());

        let spec = self.command();
        let status = runner.run(&spec, dir)?;
        if !status.success() {
            return Err(BuildError::CommandFailed {
                command: spec.to_string(),
                path: dir.to_path_buf(),
                exit_code: status.exit_code,
            });
        }

        tracing::debug!(
            "{} finished in {}ms",
            dir.display(),
            status.duration.as_millis()
        );

        self.executable_path(dir)
    }
}

/// Name of the project directory, used as the executable name
pub(crate) fn project_name(dir: &Path) -> BuildResult<&std::ffi::OsStr> {
    dir.file_name().ok_or_else(|| BuildError::InvalidProject {
        path: dir.to_path_buf(),
    })
}
