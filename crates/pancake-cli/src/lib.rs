//! Command-line interface for pancake.
//!
//! The binary in `main.rs` parses arguments with [`Cli`], loads the user's
//! configuration through [`bootstrap`], and dispatches to [`handlers`].
//! Terminal concerns specific to the AI session (raw keystrokes, the
//! thinking indicator, clipboard, markdown) live in [`terminal`] and
//! [`presentation`].

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary only.
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod project_commands;
pub mod terminal;
pub mod tool_commands;
pub mod utils;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap};
pub use commands::Commands;
pub use config_commands::ConfigCommand;
pub use error::CliError;
pub use parser::Cli;
pub use project_commands::ProjectCommand;
pub use tool_commands::ToolCommand;
