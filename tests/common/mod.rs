//! Common test utilities for build-all tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch tree: `<tmp>/src` holds projects, links land in `<tmp>`
pub struct Workspace {
    pub dir: TempDir,
    pub root: PathBuf,
    pub config: PathBuf,
}

impl Workspace {
    /// Create a workspace whose builders run `cargo_cmd` and `make_cmd`
    pub fn new(cargo_cmd: &str, make_cmd: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let base = dir.path().canonicalize().expect("Failed to canonicalize temp dir");
        let root = base.join("src");
        fs::create_dir(&root).expect("Failed to create root");

        let config = base.join("build-all.toml");
        fs::write(
            &config,
            format!(
                "[builders.cargo]\ncommand = \"{}\"\n\n[builders.make]\ncommand = \"{}\"\n",
                cargo_cmd, make_cmd
            ),
        )
        .expect("Failed to write config");

        Self { dir, root, config }
    }

    /// Directory receiving the links
    pub fn link_dir(&self) -> &Path {
        self.root.parent().expect("root has a parent")
    }

    /// Create a project directory containing `manifest`
    pub fn add_project(&self, name: &str, manifest: &str) -> PathBuf {
        let project = self.root.join(name);
        fs::create_dir_all(&project).expect("Failed to create project");
        fs::write(project.join(manifest), "").expect("Failed to write manifest");
        project
    }

    /// The binary, pointed at this workspace and isolated from user config
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("build-all").expect("binary exists");
        cmd.current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .arg(&self.root)
            .arg("--config")
            .arg(&self.config);
        cmd
    }
}
