//! Top-level build driver
//!
//! Walks the root directory in name order and, for each project directory,
//! detects the builder, runs it and publishes the executable. Entries that
//! cannot be entered are skipped with a warning; every other failure stops
//! the run and is returned to the caller. Links published before a failure
//! are kept.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::builder::{detect_builder, BuilderKind};
use crate::config::BuildersConfig;
use crate::error::BuildError;
use crate::executor::CommandRunner;
use crate::publish::{link_path, publish_executable};

/// What to build and where to link it
#[derive(Debug, Clone)]
pub struct BuildPlan {
    /// Directory whose entries are projects (absolute)
    pub root: PathBuf,
    /// Directory receiving the links
    pub link_dir: PathBuf,
    /// Entry excluded from the walk, usually the running executable
    pub exclude: Option<PathBuf>,
    /// Entry names skipped without a warning
    pub skip: Vec<String>,
    /// Detect and report only; run nothing and touch no links
    pub dry_run: bool,
}

impl BuildPlan {
    pub fn new(root: impl Into<PathBuf>, link_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            link_dir: link_dir.into(),
            exclude: None,
            skip: vec![],
            dry_run: false,
        }
    }

    /// Exclude an entry (compared after canonicalization)
    pub fn excluding(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude = Some(path.into());
        self
    }

    /// Skip entries by name
    pub fn skipping<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Check if a root entry name is listed in `skip`
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip.iter().any(|s| s == name)
    }
}

/// What happened to one root entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProjectOutcome {
    /// Built and linked
    Published {
        name: String,
        builder: BuilderKind,
        link: PathBuf,
        target: PathBuf,
    },
    /// Would be built and linked (dry run)
    Planned {
        name: String,
        builder: BuilderKind,
        link: PathBuf,
        target: PathBuf,
    },
    /// Not a project directory
    Skipped { path: PathBuf, reason: String },
}

/// Outcome of a complete run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub link_dir: PathBuf,
    pub dry_run: bool,
    pub projects: Vec<ProjectOutcome>,
}

impl RunReport {
    /// Number of projects built and linked
    pub fn published(&self) -> usize {
        self.projects
            .iter()
            .filter(|p| matches!(p, ProjectOutcome::Published { .. }))
            .count()
    }

    /// Number of skipped entries
    pub fn skipped(&self) -> usize {
        self.projects
            .iter()
            .filter(|p| matches!(p, ProjectOutcome::Skipped { .. }))
            .count()
    }
}

/// Detect and build one project directory
///
/// Returns the builder used and the executable path; nothing is linked.
///
/// # Errors
/// * `BuildError::UnknownProjectType` - If no manifest is present
/// * `BuildError::CommandFailed` / `BuildError::SpawnFailed` - If the build fails
pub fn build_project(
    dir: &Path,
    builders: &BuildersConfig,
    runner: &dyn CommandRunner,
) -> Result<(BuilderKind, PathBuf), BuildError> {
    let kind = detect_project(dir)?;
    let executable = kind.builder(builders).build(dir, runner)?;
    Ok((kind, executable))
}

fn detect_project(dir: &Path) -> Result<BuilderKind, BuildError> {
    let detection = detect_builder(dir);
    let kind = detection
        .detected
        .ok_or_else(|| BuildError::UnknownProjectType {
            path: dir.to_path_buf(),
        })?;

    if detection.available.len() > 1 {
        let manifests: Vec<_> = detection.available.iter().map(|k| k.manifest()).collect();
        tracing::debug!(
            "{} has {}, using {}",
            dir.display(),
            manifests.join(", "),
            kind.manifest()
        );
    }

    Ok(kind)
}

/// Whether `path` can be entered as a working directory
///
/// Resolving `path/.` needs search permission on `path` and fails with
/// ENOTDIR for anything that is not a directory.
fn check_enterable(path: &Path) -> std::io::Result<()> {
    fs::metadata(path.join(".")).map(|_| ())
}

/// Build every project under `plan.root` and publish its executable
///
/// # Errors
/// Returns the first fatal error; later entries are not processed.
pub fn build_all(
    plan: &BuildPlan,
    builders: &BuildersConfig,
    runner: &dyn CommandRunner,
) -> Result<RunReport, BuildError> {
    let mut report = RunReport {
        root: plan.root.clone(),
        link_dir: plan.link_dir.clone(),
        dry_run: plan.dry_run,
        projects: vec![],
    };

    let exclude = plan.exclude.as_ref().and_then(|p| p.canonicalize().ok());

    let mut entries = fs::read_dir(&plan.root)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for path in entries {
        if exclude.is_some() && path.canonicalize().ok() == exclude {
            continue;
        }

        let entry_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if plan.is_skipped(&entry_name) {
            tracing::debug!("Skipping configured entry {}", path.display());
            report.projects.push(ProjectOutcome::Skipped {
                path,
                reason: "listed in skip".to_string(),
            });
            continue;
        }

        if let Err(e) = check_enterable(&path) {
            tracing::warn!("ignoring file {}: {}", path.display(), e);
            report.projects.push(ProjectOutcome::Skipped {
                path,
                reason: e.to_string(),
            });
            continue;
        }

        // Symlinked projects are named after the directory they resolve to
        let dir = path.canonicalize()?;
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or(entry_name);

        let outcome = if plan.dry_run {
            plan_project(&dir, name, builders, &plan.link_dir)?
        } else {
            let (builder, target) = build_project(&dir, builders, runner)?;
            let link = publish_executable(&plan.link_dir, &target)?;
            ProjectOutcome::Published {
                name,
                builder,
                link,
                target,
            }
        };
        report.projects.push(outcome);
    }

    tracing::debug!(
        "Published {} project(s), skipped {} entr(ies)",
        report.published(),
        report.skipped()
    );

    Ok(report)
}

fn plan_project(
    dir: &Path,
    name: String,
    builders: &BuildersConfig,
    link_dir: &Path,
) -> Result<ProjectOutcome, BuildError> {
    let kind = detect_project(dir)?;
    let builder = kind.builder(builders);
    let target = builder.executable_path(dir)?;
    let link = link_path(link_dir, &target)?;

    tracing::info!(
        "would build {} {:?} with `{}`",
        kind,
        dir.display().to_string(),
        builder.command()
    );

    Ok(ProjectOutcome::Planned {
        name,
        builder: kind,
        link,
        target,
    })
}
