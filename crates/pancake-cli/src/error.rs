//! CLI-specific error types and mappings.
//!
//! Library errors are folded into [`CliError`] so `main` can pick a
//! sysexits-style exit code.

use pancake_core::{ConfigError, SessionError};
use pancake_runtime::ProcessError;
use thiserror::Error;

/// Exit code for failures that carry no [`CliError`].
pub const GENERAL_FAILURE: i32 = 1;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Process execution error.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Process(_) => 71,  // EX_OSERR
        }
    }

    /// Exit code for an error that reached `main`.
    pub fn exit_code_for(err: &anyhow::Error) -> i32 {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<Self>())
            .map_or(GENERAL_FAILURE, Self::exit_code)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownProject(_) => Self::Arguments(err.to_string()),
            ConfigError::Write { .. } => Self::Io(err.to_string()),
            _ => Self::Config(err.to_string()),
        }
    }
}

impl From<ProcessError> for CliError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Io(io) => Self::Io(io.to_string()),
            other => Self::Process(other.to_string()),
        }
    }
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Input(io) => Self::Io(format!("terminal input: {io}")),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn config_errors_use_ex_config() {
        let err: CliError = ConfigError::NotFound(PathBuf::from("/home/dev/pancake.toml")).into();
        assert_eq!(err.exit_code(), 78);
        assert!(err.to_string().contains("pancake config init"));
    }

    #[test]
    fn unknown_project_is_a_usage_error() {
        let err: CliError = ConfigError::UnknownProject("ghost".into()).into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn process_failures_use_ex_oserr() {
        let err: CliError = ProcessError::Exit {
            command: "git pull".into(),
            code: Some(1),
        }
        .into();
        assert_eq!(err.exit_code(), 71);
    }

    #[test]
    fn exit_code_is_found_through_context() {
        let err = anyhow::Error::new(CliError::Io("disk full".into())).context("saving config");
        assert_eq!(CliError::exit_code_for(&err), 74);

        let plain = anyhow::anyhow!("boom");
        assert_eq!(CliError::exit_code_for(&plain), GENERAL_FAILURE);

        let wrapped = anyhow::Error::new(std::io::Error::other("raw io")).context("copying");
        assert_eq!(CliError::exit_code_for(&wrapped), GENERAL_FAILURE);
    }
}
