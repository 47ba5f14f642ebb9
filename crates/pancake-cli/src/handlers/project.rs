//! Project command handler.
//!
//! Every project lives in `home/<name>`. Operations that accept an optional
//! name act on all configured projects after a confirmation prompt; in that
//! mode a failing project is reported and the next one still runs.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use pancake_core::ProcessRecords;
use pancake_runtime::{CommandSpec, SyncPlan, git, launcher, opener};
use tracing::{debug, info};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_optional, print_table, truncate_string};
use crate::project_commands::ProjectCommand;
use crate::utils::input;

const REMOTE_COLUMN_WIDTH: usize = 48;

/// Execute a project subcommand.
pub async fn execute(ctx: &CliContext, command: ProjectCommand) -> Result<()> {
    match command {
        ProjectCommand::List => list(ctx),
        ProjectCommand::Sync { name } => {
            for_each_project(ctx, name.as_deref(), Verb::Sync).await?;
        }
        ProjectCommand::Build { name } => {
            for_each_project(ctx, name.as_deref(), Verb::Build).await?;
        }
        ProjectCommand::Run { name } => {
            for_each_project(ctx, name.as_deref(), Verb::Run).await?;
        }
        ProjectCommand::Monitor => monitor(ctx)?,
        ProjectCommand::Open { name } => open(ctx, name.as_deref()).await?,
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Verb {
    Sync,
    Build,
    Run,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sync => "sync",
            Self::Build => "build",
            Self::Run => "run",
        })
    }
}

fn list(ctx: &CliContext) {
    let projects = &ctx.config.projects;
    if projects.is_empty() {
        println!("No projects configured. Run 'pancake config edit' to add some.");
        return;
    }

    print_table(&["Name", "Type", "Port", "Remote"], &list_rows(ctx));
}

fn list_rows(ctx: &CliContext) -> Vec<Vec<String>> {
    ctx.config
        .projects
        .iter()
        .map(|(name, project)| {
            vec![
                name.clone(),
                format_optional(project.kind.as_ref(), "-"),
                format_optional(project.port.as_ref(), "-"),
                truncate_string(&project.remote_ssh_url, REMOTE_COLUMN_WIDTH),
            ]
        })
        .collect()
}

/// Names to operate on: the given one, or every project after confirmation.
fn select_projects(ctx: &CliContext, name: Option<&str>, verb: Verb) -> Result<Vec<String>> {
    if let Some(name) = name {
        ctx.config.project(name).map_err(CliError::from)?;
        return Ok(vec![name.to_string()]);
    }

    let names: Vec<String> = ctx.config.projects.keys().cloned().collect();
    if names.is_empty() {
        println!("No projects configured.");
        return Ok(names);
    }

    let confirmed = input::prompt_confirmation(&format!(
        "Do you want to {verb} all {} projects?",
        names.len()
    ))?;
    if confirmed {
        Ok(names)
    } else {
        println!("Action aborted.");
        Ok(Vec::new())
    }
}

async fn for_each_project(ctx: &CliContext, name: Option<&str>, verb: Verb) -> Result<()> {
    let names = select_projects(ctx, name, verb)?;
    let bulk = name.is_none();
    let mut records = match verb {
        Verb::Run => Some(
            ProcessRecords::load(&ctx.config.process_record_path()).map_err(CliError::from)?,
        ),
        Verb::Sync | Verb::Build => None,
    };

    let mut failed = 0_usize;
    for project in &names {
        let outcome = match verb {
            Verb::Sync => sync_one(ctx, project).await,
            Verb::Build => build_one(ctx, project).await,
            Verb::Run => match records.as_mut() {
                Some(records) => run_one(ctx, project, records),
                None => Ok(()),
            },
        };

        if let Err(err) = outcome {
            if !bulk {
                return Err(err.into());
            }
            failed += 1;
            eprintln!("❌ Failed to {verb} project {project}: {err}");
        }
    }

    if failed > 0 {
        return Err(CliError::Process(format!(
            "{failed} of {} projects failed to {verb}",
            names.len()
        ))
        .into());
    }
    Ok(())
}

async fn sync_one(ctx: &CliContext, name: &str) -> Result<(), CliError> {
    let project = ctx.config.project(name)?;
    let dir = ctx.config.project_dir(name);
    let plan = SyncPlan::for_checkout(&dir, &project.remote_ssh_url);

    if matches!(plan, SyncPlan::Clone { .. }) && project.remote_ssh_url.trim().is_empty() {
        return Err(CliError::Config(format!(
            "Project '{name}' has no remote_ssh_url to clone from"
        )));
    }

    println!("> {}", plan.command());
    git::sync(&plan).await?;
    println!("✅ Synchronized project {name} in {}", dir.display());
    Ok(())
}

async fn build_one(ctx: &CliContext, name: &str) -> Result<(), CliError> {
    let project = ctx.config.project(name)?;
    let dir = ctx.config.project_dir(name);
    ensure_checkout(name, &dir)?;

    let script = project.build_command().ok_or_else(|| {
        CliError::Config(format!("Build command not specified for project '{name}'"))
    })?;

    let cmd = CommandSpec::shell(script).current_dir(&dir);
    println!("> {script}");
    cmd.run().await?;
    println!("✅ Built project {name} successfully.");
    Ok(())
}

fn run_one(ctx: &CliContext, name: &str, records: &mut ProcessRecords) -> Result<(), CliError> {
    let project = ctx.config.project(name)?;
    let dir = ctx.config.project_dir(name);
    ensure_checkout(name, &dir)?;

    let script = project.run_command().ok_or_else(|| {
        CliError::Config(format!("Run command not specified for project '{name}'"))
    })?;

    let pid = launcher::launch_in_new_terminal(&dir, script)?;
    if let Some(previous) = records.record(name, pid) {
        debug!(project = name, previous, "Replacing recorded PID");
    }
    records.save(&ctx.config.process_record_path())?;

    info!(project = name, pid, "Launched project");
    println!("🚀 Started project {name} in a new terminal (PID {pid}).");
    Ok(())
}

fn ensure_checkout(name: &str, dir: &Path) -> Result<(), CliError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(CliError::Io(format!(
            "Project path {} does not exist. Run 'pancake project sync {name}' first.",
            dir.display()
        )))
    }
}

fn monitor(ctx: &CliContext) -> Result<(), CliError> {
    let records = ProcessRecords::load(&ctx.config.process_record_path())?;
    if records.is_empty() {
        println!("No started projects recorded.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|(name, pid)| vec![name.to_string(), pid.to_string()])
        .collect();
    print_table(&["Project", "PID"], &rows);
    println!();
    println!("Note: PIDs are recorded at launch and not re-checked; a listed process may have exited.");
    Ok(())
}

async fn open(ctx: &CliContext, name: Option<&str>) -> Result<(), CliError> {
    let path = match name {
        Some(name) => {
            ctx.config.project(name)?;
            ctx.config.project_dir(name)
        }
        None => ctx.config.home_dir().to_path_buf(),
    };

    if ctx.config.code_editor.trim().is_empty() {
        return Err(CliError::Config(
            "code_editor is not set. Add e.g. code_editor = \"code\" to pancake.toml".to_string(),
        ));
    }

    opener::open_in_editor(&ctx.config.code_editor, &path).await?;
    println!("Opened {} in {}", path.display(), ctx.config.code_editor);
    Ok(())
}
