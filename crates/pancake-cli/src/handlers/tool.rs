//! Tool command handler.
//!
//! Forwards to the platform package manager. Installs and uninstalls also
//! update the `tools` table of the configuration, which is written back
//! immediately after the package manager succeeds.

use anyhow::Result;
use pancake_runtime::{PackageManager, ToolOperation};
use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::tool_commands::ToolCommand;
use crate::utils::input;

/// Execute a tool subcommand.
///
/// Takes the context mutably because install/uninstall edit the tools list.
pub async fn execute(ctx: &mut CliContext, command: ToolCommand) -> Result<()> {
    match command {
        ToolCommand::List => list(ctx),
        ToolCommand::Setup => setup().await?,
        ToolCommand::Install { name } => {
            let manager = ensure_available().await?;
            forward(ctx, manager, ToolOperation::Install, &name).await?;
            ctx.config.add_tool(&name);
            ctx.save_config()?;
            info!(tool = %name, "Recorded installed tool");
        }
        ToolCommand::Uninstall { name } => {
            let manager = ensure_available().await?;
            forward(ctx, manager, ToolOperation::Uninstall, &name).await?;
            if ctx.config.remove_tool(&name) {
                ctx.save_config()?;
                info!(tool = %name, "Removed tool from configuration");
            }
        }
        ToolCommand::Search { query } => {
            let manager = ensure_available().await?;
            forward(ctx, manager, ToolOperation::Search, &query.join(" ")).await?;
        }
        ToolCommand::Info { name } => {
            let manager = ensure_available().await?;
            forward(ctx, manager, ToolOperation::Info, &name).await?;
        }
        ToolCommand::Upgrade { name } => {
            let manager = ensure_available().await?;
            forward(ctx, manager, ToolOperation::Upgrade, &name).await?;
        }
    }
    Ok(())
}

fn list(ctx: &CliContext) {
    if ctx.config.tools.is_empty() {
        println!("No tools installed through pancake yet.");
        return;
    }
    for (name, version) in &ctx.config.tools {
        println!("- {name} ({version})");
    }
}

/// Detect the package manager and check it responds to `-v`.
async fn ensure_available() -> Result<PackageManager, CliError> {
    let manager = PackageManager::detect()?;
    if manager.is_available().await {
        Ok(manager)
    } else {
        Err(CliError::Config(format!(
            "{manager} is not installed. Please run 'pancake tool setup' first."
        )))
    }
}

async fn forward(
    ctx: &CliContext,
    manager: PackageManager,
    op: ToolOperation,
    arg: &str,
) -> Result<(), CliError> {
    let cmd = manager.command(op, arg, &ctx.config.tools_dir());
    println!("> {cmd}");
    cmd.run().await?;
    Ok(())
}

async fn setup() -> Result<()> {
    let manager = PackageManager::detect().map_err(CliError::from)?;
    println!("pancake uses {manager} to manage tools.");

    if manager.is_available().await {
        println!("{manager} is already installed.");
        return Ok(());
    }

    if !input::prompt_confirmation("Do you want to proceed with the installation?")? {
        println!("Operation aborted by the user.");
        return Ok(());
    }

    println!("Installing {manager}...");
    manager.setup().await.map_err(CliError::from)?;
    println!("✅ {manager} installed.");
    Ok(())
}
