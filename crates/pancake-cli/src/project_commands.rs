//! Project management subcommands.

use clap::Subcommand;

/// Operations on projects declared in the configuration.
///
/// Commands that take an optional name act on every project (after
/// confirmation) when the name is omitted.
#[derive(Subcommand)]
pub enum ProjectCommand {
    /// List configured projects
    List,
    /// Clone missing checkouts and pull existing ones
    Sync {
        /// Project name (all projects when omitted)
        name: Option<String>,
    },
    /// Run the project's build command in its directory
    Build {
        /// Project name (all projects when omitted)
        name: Option<String>,
    },
    /// Start the project's run command in a new terminal window
    #[command(visible_alias = "start")]
    Run {
        /// Project name (all projects when omitted)
        name: Option<String>,
    },
    /// Show recorded process IDs of started projects
    Monitor,
    /// Open the projects home, or one project, in the code editor
    Open {
        /// Project name (projects home when omitted)
        name: Option<String>,
    },
}
