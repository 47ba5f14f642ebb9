//! Core domain types and ports for pancake.
//!
//! This crate owns everything that does not talk to the outside world
//! directly: the configuration model, project definitions, the AI session
//! transcript and loop, code-block extraction, and the persisted record of
//! launched processes. Adapters (HTTP providers, process spawning, terminal
//! I/O) live in sibling crates and plug in through the traits in [`ports`].

pub mod config;
pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{
    ChatGptSettings, Config, ConfigError, DEFAULT_TEMPLATE, GeminiSettings, ProviderKind,
};
pub use domain::{
    CodeBlock, Language, ProcessRecords, Project, Role, Transcript, TranscriptEntry,
    extract_code_block,
};
pub use paths::{PathError, config_path, home_dir};
pub use ports::{ApiError, ContentGenerator, GenerateError};
pub use services::{NextTurn, Session, SessionError, SessionIo, SessionSummary};
