//! Command dispatch

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::AdvisingService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{LoadReport, MissingPrerequisite};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = project_dir(cli)?;
    let settings = Settings::load(Some(&project_dir))?;
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::List) => cmd_list(&container, &source_path(cli, &container, &project_dir)),
        Some(Commands::Show { course }) => {
            cmd_show(&container, &source_path(cli, &container, &project_dir), course)
        }
        Some(Commands::Validate { strict }) => {
            cmd_validate(&container, &source_path(cli, &container, &project_dir), *strict)
        }
        Some(Commands::Tree) => cmd_tree(&container, &source_path(cli, &container, &project_dir)),
        Some(Commands::Config { command }) => cmd_config(&container, command, &project_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "advisor", &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::from(InfraError::io("resolve current directory", e))),
    }
}

/// `--file` wins over the configured default; relative paths resolve against the project dir.
fn source_path(cli: &Cli, container: &ServiceContainer, project_dir: &Path) -> PathBuf {
    let source = cli
        .file
        .clone()
        .unwrap_or_else(|| container.settings.default_source.clone());
    project_dir.join(source)
}

/// A loaded catalog together with its one validation pass.
struct Loaded {
    service: AdvisingService,
    missing: Vec<MissingPrerequisite>,
}

/// One warning line per rejected duplicate and per dangling reference.
fn load_diagnostics(report: &LoadReport, missing: &[MissingPrerequisite]) -> Vec<String> {
    let rejected = report.rejected.iter().map(|e| e.to_string());
    let dangling = missing.iter().map(|m| {
        format!(
            "Course {} references missing prerequisite {}",
            m.course, m.prerequisite
        )
    });
    rejected.chain(dangling).collect()
}

/// Build the catalog, validate it once and print each diagnostic once.
fn load_service(container: &ServiceContainer, source: &Path) -> CliResult<Loaded> {
    let mut service = container.advising_service();
    let report = service.load(source)?;
    let missing = service.validate();
    for line in load_diagnostics(&report, &missing) {
        output::warning(&line);
    }
    debug!("loaded {} courses", report.inserted);
    Ok(Loaded { service, missing })
}

#[instrument(skip(container))]
fn cmd_list(container: &ServiceContainer, source: &Path) -> CliResult<()> {
    let Loaded { service, .. } = load_service(container, source)?;
    output::header("Here is a sample schedule:");

    let mut out = io::stdout().lock();
    for course in service.list() {
        writeln!(out, "{}", course).map_err(|e| InfraError::io("write course list", e))?;
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, source: &Path, course: &str) -> CliResult<()> {
    if course.trim().is_empty() {
        return Err(CliError::InvalidArgs("course number is empty".to_string()));
    }
    let query = if container.settings.uppercase_queries {
        course.to_uppercase()
    } else {
        course.to_string()
    };

    let Loaded { service, .. } = load_service(container, source)?;
    let found = service.course(&query)?;
    output::info(found);
    output::info(&format!("Prerequisites: {}", found.prerequisite_line()));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_validate(container: &ServiceContainer, source: &Path, strict: bool) -> CliResult<()> {
    let Loaded { service, missing } = load_service(container, source)?;
    if missing.is_empty() {
        output::success(&format!(
            "{} courses, all prerequisites resolve",
            service.catalog().distinct_len()
        ));
        return Ok(());
    }
    if strict {
        return Err(CliError::Validation {
            count: missing.len(),
        });
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, source: &Path) -> CliResult<()> {
    let Loaded { service, .. } = load_service(container, source)?;
    let tree = service.catalog().tree();
    output::info(&tree.to_tree_string());
    output::action("depth", &tree.depth());
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    project_dir: &Path,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no global config directory on this platform"),
            }
            output::action("local", &local_config_path(project_dir).display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    fn missing(course: &str, prerequisite: &str) -> MissingPrerequisite {
        MissingPrerequisite {
            course: course.to_string(),
            prerequisite: prerequisite.to_string(),
        }
    }

    #[test]
    fn given_rejection_and_dangling_reference_when_collecting_then_one_line_each() {
        let report = LoadReport {
            inserted: 2,
            skipped: 0,
            rejected: vec![DomainError::DuplicateCourse("CS100".to_string())],
        };

        let lines = load_diagnostics(&report, &[missing("CS200", "CS999")]);

        assert_eq!(
            lines,
            vec![
                "duplicate course rejected: CS100".to_string(),
                "Course CS200 references missing prerequisite CS999".to_string(),
            ]
        );
    }

    #[test]
    fn given_clean_load_when_collecting_then_no_lines() {
        assert!(load_diagnostics(&LoadReport::default(), &[]).is_empty());
    }
}
