//! Makefile builder implementation
//!
//! Runs the default make target and expects the executable to be left in
//! the project directory under the directory's own name.

use std::path::{Path, PathBuf};

use super::traits::{project_name, BuildResult, Builder};
use crate::config::MakeConfig;
use crate::executor::CommandSpec;

/// Manifest that marks a Make project
pub const MAKE_MANIFEST: &str = "Makefile";

/// Builder for GNU Make projects
#[derive(Debug, Clone)]
pub struct MakeBuilder {
    config: MakeConfig,
}

impl Default for MakeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MakeBuilder {
    /// Create a new Makefile builder using system `make`
    pub fn new() -> Self {
        Self {
            config: MakeConfig::default(),
        }
    }

    /// Create a Makefile builder from configuration
    pub fn with_config(config: MakeConfig) -> Self {
        Self { config }
    }
}

impl Builder for MakeBuilder {
    fn name(&self) -> &str {
        "make"
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(&self.config.command).with_args(&self.config.args)
    }

    fn executable_path(&self, dir: &Path) -> BuildResult<PathBuf> {
        Ok(dir.join(project_name(dir)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::executor::{CommandStatus, MockCommandRunner};
    use mockall::predicate::{always, eq};
    use std::time::Duration;

    #[test]
    fn test_make_command() {
        let builder = MakeBuilder::new();
        assert_eq!(builder.command().to_string(), "make");
    }

    #[test]
    fn test_make_command_with_args() {
        let builder = MakeBuilder::with_config(MakeConfig {
            command: "gmake".to_string(),
            args: vec!["-j4".to_string(), "all".to_string()],
        });
        assert_eq!(builder.command().to_string(), "gmake -j4 all");
    }

    #[test]
    fn test_make_executable_path() {
        let exe = MakeBuilder::new()
            .executable_path(Path::new("/src/padleft"))
            .unwrap();
        assert_eq!(exe, PathBuf::from("/src/padleft/padleft"));
    }

    #[test]
    fn test_make_build_runs_in_project_dir() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .with(eq(CommandSpec::new("make")), eq(Path::new("/src/munch")))
            .times(1)
            .returning(|_, _| {
                Ok(CommandStatus {
                    exit_code: Some(0),
                    duration: Duration::ZERO,
                })
            });

        let exe = MakeBuilder::new()
            .build(Path::new("/src/munch"), &runner)
            .unwrap();
        assert_eq!(exe, PathBuf::from("/src/munch/munch"));
    }

    #[test]
    fn test_make_build_spawn_failure_propagates() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().with(always(), always()).returning(|spec, _| {
            Err(BuildError::SpawnFailed {
                command: spec.to_string(),
                error: "cannot find binary path".to_string(),
            })
        });

        let err = MakeBuilder::new()
            .build(Path::new("/src/munch"), &runner)
            .unwrap_err();
        assert!(matches!(err, BuildError::SpawnFailed { .. }));
    }
}
