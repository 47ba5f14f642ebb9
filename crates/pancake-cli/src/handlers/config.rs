//! Config command handler.
//!
//! These commands work on the configuration file itself, so they run before
//! (and without) loading it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pancake_core::{ConfigError, DEFAULT_TEMPLATE};
use pancake_runtime::opener;

use crate::config_commands::ConfigCommand;
use crate::error::CliError;

/// Execute a config subcommand against the file at `config_path`.
pub fn execute(config_path: &Path, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Path => println!("{}", config_path.display()),
        ConfigCommand::Init { force } => {
            if init(config_path, force)? {
                println!("✅ Created {}", config_path.display());
                println!("Edit it with 'pancake config edit'.");
            } else {
                println!(
                    "Configuration already exists at {} (use --force to overwrite).",
                    config_path.display()
                );
            }
        }
        ConfigCommand::Edit => {
            if !config_path.exists() {
                return Err(CliError::from(ConfigError::NotFound(config_path.to_path_buf())).into());
            }
            opener::open_with_default_app(config_path).map_err(CliError::from)?;
            println!("Opening {}", config_path.display());
        }
    }
    Ok(())
}

/// Write the starter configuration. Returns `false` if a file was kept.
fn init(config_path: &Path, force: bool) -> Result<bool> {
    if config_path.exists() && !force {
        return Ok(false);
    }
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(config_path, DEFAULT_TEMPLATE)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_template_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pancake.toml");

        assert!(init(&path, false).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_TEMPLATE);

        fs::write(&path, "home = \"/custom\"\n").unwrap();
        assert!(!init(&path, false).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "home = \"/custom\"\n");

        assert!(init(&path, true).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_TEMPLATE);
    }

    #[test]
    fn edit_without_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = execute(&dir.path().join("absent.toml"), ConfigCommand::Edit).unwrap_err();
        assert_eq!(CliError::exit_code_for(&err), 78);
    }
}
