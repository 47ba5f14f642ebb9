//! Tool management subcommands.

use clap::Subcommand;

/// Package-manager backed tool commands.
#[derive(Subcommand)]
pub enum ToolCommand {
    /// List tools installed through pancake
    List,
    /// Install the platform package manager (Homebrew or Chocolatey)
    Setup,
    /// Install a tool and record it in the configuration
    Install {
        /// Package name
        name: String,
    },
    /// Uninstall a tool and remove it from the configuration
    Uninstall {
        /// Package name
        name: String,
    },
    /// Search the package index
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show package details
    Info {
        /// Package name
        name: String,
    },
    /// Upgrade an installed tool
    #[command(visible_alias = "update")]
    Upgrade {
        /// Package name
        name: String,
    },
}
