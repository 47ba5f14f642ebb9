//! CLI bootstrap - the composition root.
//!
//! The configuration file is located and loaded exactly once here, and the
//! resulting [`CliContext`] is handed to every handler by reference.

use std::path::{Path, PathBuf};

use pancake_core::Config;
use tracing::debug;

use crate::error::CliError;

/// Fully composed application context for CLI commands.
#[derive(Debug)]
pub struct CliContext {
    /// Loaded configuration with `home` resolved.
    pub config: Config,
    /// Location the configuration was loaded from; saves go back here.
    pub config_path: PathBuf,
}

impl CliContext {
    /// Build a context around an already-loaded configuration.
    pub const fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Persist the configuration to the file it came from.
    pub fn save_config(&self) -> Result<(), CliError> {
        self.config.save(&self.config_path)?;
        Ok(())
    }
}

/// Load the configuration at `config_path` and compose the context.
pub fn bootstrap(config_path: &Path) -> Result<CliContext, CliError> {
    let config = Config::load(config_path)?;
    debug!(
        home = %config.home_dir().display(),
        provider = config.ai_provider.display_name(),
        "Bootstrapped CLI context"
    );
    Ok(CliContext::new(config, config_path.to_path_buf()))
}
