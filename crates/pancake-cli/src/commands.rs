//! Main commands enum and primary subcommands.

use clap::Subcommand;
use pancake_core::ProviderKind;

use crate::config_commands::ConfigCommand;
use crate::project_commands::ProjectCommand;
use crate::tool_commands::ToolCommand;

/// Available pancake commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Sync, build, run, monitor and open configured projects
    #[command(visible_alias = "p")]
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Install and manage developer tools through the system package manager
    #[command(visible_alias = "t")]
    Tool {
        #[command(subcommand)]
        command: ToolCommand,
    },

    /// Turn a natural-language request into a shell command
    Ai {
        /// What you want to do (prompted for when omitted)
        #[arg(trailing_var_arg = true)]
        description: Vec<String>,
        /// Provider to use instead of `ai_provider` from the configuration
        #[arg(long, value_parser = parse_provider)]
        provider: Option<ProviderKind>,
    },

    /// Create, locate or edit the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Print version information
    Version,
}

fn parse_provider(raw: &str) -> Result<ProviderKind, String> {
    raw.parse()
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::parser::Cli;
    use crate::tool_commands::ToolCommand;

    #[test]
    fn ai_collects_free_text_and_provider() {
        let cli = Cli::parse_from([
            "pancake",
            "ai",
            "--provider",
            "chatgpt",
            "find",
            "large",
            "files",
        ]);
        match cli.command {
            Some(Commands::Ai {
                description,
                provider,
            }) => {
                assert_eq!(description.join(" "), "find large files");
                assert_eq!(provider, Some(ProviderKind::ChatGpt));
            }
            _ => panic!("expected ai command"),
        }
    }

    #[test]
    fn ai_rejects_unknown_provider() {
        assert!(Cli::try_parse_from(["pancake", "ai", "--provider", "bard", "hi"]).is_err());
    }

    #[test]
    fn short_aliases_resolve() {
        let cli = Cli::parse_from(["pancake", "t", "install", "jq"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Tool {
                command: ToolCommand::Install { ref name }
            }) if name == "jq"
        ));
    }
}
