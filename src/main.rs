//! build-all CLI entry point
//!
//! Usage:
//!   build-all                    Build the projects next to this executable
//!   build-all <root>             Build the projects in <root>
//!   build-all -n                 Show what would be built and linked

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use build_all::cli::{Cli, OutputFormat};
use build_all::config::{load_config, Config};
use build_all::error::BuildError;
use build_all::executor::SystemRunner;
use build_all::orchestrator::{build_all, BuildPlan, ProjectOutcome, RunReport};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            if let Some(hint) = e.downcast_ref::<BuildError>().and_then(BuildError::suggestion) {
                eprintln!("{}: {}", "hint".yellow().bold(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr subscriber; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool, json: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let plan = resolve_plan(cli, &config)?;

    let report = build_all(&plan, &config.builders, &SystemRunner::new())?;
    print_report(&report, cli.format)?;

    Ok(())
}

/// Combine CLI overrides and configuration into a build plan
fn resolve_plan(cli: &Cli, config: &Config) -> Result<BuildPlan> {
    let root = match &cli.root {
        Some(root) => root
            .canonicalize()
            .with_context(|| format!("cannot resolve root {}", root.display()))?,
        None => config.resolve_root()?,
    };

    let link_dir = match &cli.link_dir {
        Some(dir) => dir.clone(),
        None => config.resolve_link_dir(&root)?,
    };

    let mut plan = BuildPlan::new(root, link_dir)
        .skipping(&config.skip)
        .with_dry_run(cli.dry_run);

    // The executable may live in the root it builds
    if let Ok(exe) = std::env::current_exe() {
        plan = plan.excluding(exe);
    }

    Ok(plan)
}

fn print_report(report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Plain => {
            for project in &report.projects {
                match project {
                    ProjectOutcome::Published { link, target, .. }
                    | ProjectOutcome::Planned { link, target, .. } => {
                        println!("{} -> {}", link.display(), target.display());
                    }
                    ProjectOutcome::Skipped { .. } => {}
                }
            }
        }
        OutputFormat::Table => {
            println!("{}: {}", "Root".cyan(), report.root.display());
            println!("{}: {}", "Links".cyan(), report.link_dir.display());
            println!();

            if report.projects.is_empty() {
                println!("No projects found.");
                return Ok(());
            }

            let width = report
                .projects
                .iter()
                .filter_map(|p| match p {
                    ProjectOutcome::Published { name, .. }
                    | ProjectOutcome::Planned { name, .. } => Some(name.len()),
                    ProjectOutcome::Skipped { .. } => None,
                })
                .max()
                .unwrap_or(10);

            for project in &report.projects {
                match project {
                    ProjectOutcome::Published {
                        name,
                        builder,
                        link,
                        target,
                    } => println!(
                        "  {} {:width$}  {:5}  {} -> {}",
                        "linked".green(),
                        name,
                        builder.to_string(),
                        link.display(),
                        target.display(),
                        width = width
                    ),
                    ProjectOutcome::Planned {
                        name,
                        builder,
                        link,
                        target,
                    } => println!(
                        "  {} {:width$}  {:5}  {} -> {}",
                        "would ".cyan(),
                        name,
                        builder.to_string(),
                        link.display(),
                        target.display(),
                        width = width
                    ),
                    ProjectOutcome::Skipped { path, reason } => println!(
                        "  {} {} ({})",
                        "skipped".yellow(),
                        path.display(),
                        reason
                    ),
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_plan_cli_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src");
        std::fs::create_dir(&root).unwrap();

        let cli = Cli::parse_from(["build-all", root.to_str().unwrap()]);
        let plan = resolve_plan(&cli, &Config::default()).unwrap();

        assert_eq!(plan.root, root.canonicalize().unwrap());
        assert_eq!(Some(plan.link_dir.as_path()), plan.root.parent());
        assert!(plan.exclude.is_some());
        assert!(!plan.dry_run);
    }

    #[test]
    fn test_resolve_plan_overrides() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            skip: vec!["docs".to_string()],
            ..Default::default()
        };

        let cli = Cli::parse_from([
            "build-all",
            dir.path().to_str().unwrap(),
            "--link-dir",
            "/opt/bin",
            "--dry-run",
        ]);
        let plan = resolve_plan(&cli, &config).unwrap();

        assert_eq!(plan.link_dir, PathBuf::from("/opt/bin"));
        assert_eq!(plan.skip, vec!["docs"]);
        assert!(plan.dry_run);
    }

    #[test]
    fn test_resolve_plan_missing_root() {
        let cli = Cli::parse_from(["build-all", "/nonexistent/build-all-root"]);
        assert!(resolve_plan(&cli, &Config::default()).is_err());
    }
}
