//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call into pancake-core / pancake-runtime / pancake-genai
//!   3. Format output for the terminal
//!
//! `config` and `version` run without a loaded configuration and take no
//! context.

pub mod ai;
pub mod config;
pub mod project;
pub mod tool;
pub mod version;
