//! Process runtime and OS-level concerns for pancake.
//!
//! Everything that spawns a child process lives here: shell commands run in
//! a project directory, git checkouts, package-manager invocations, code
//! interpreters, new terminal windows, and editor/OS openers. Commands are
//! described as [`CommandSpec`] values first so their shape can be tested
//! without executing anything.

mod command;
mod error;
pub mod git;
mod interpreter;
pub mod launcher;
pub mod opener;
pub mod packages;
mod platform;

pub use command::CommandSpec;
pub use error::ProcessError;
pub use git::SyncPlan;
pub use interpreter::Interpreter;
pub use packages::{PackageManager, ToolOperation};
pub use platform::Platform;
