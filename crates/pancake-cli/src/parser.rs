//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for pancake.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "pancake")]
#[command(about = "Manage project checkouts, developer tools and shell commands from one place")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    use crate::project_commands::ProjectCommand;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_verbose_after_subcommand() {
        let cli = Cli::parse_from(["pancake", "project", "list", "--verbose"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Some(Commands::Project {
                command: ProjectCommand::List
            })
        ));
    }

    #[test]
    fn test_no_command_is_allowed() {
        let cli = Cli::parse_from(["pancake"]);
        assert!(cli.command.is_none());
    }
}
