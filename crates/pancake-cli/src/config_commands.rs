//! Configuration management subcommands.

use clap::Subcommand;

/// Configuration file commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Open the configuration file with the system default application
    Edit,
    /// Write the starter configuration if none exists
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file location
    Path,
}
