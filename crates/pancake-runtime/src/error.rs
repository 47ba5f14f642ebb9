use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while preparing or running a child process.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {}", describe_exit(.code))]
    Exit { command: String, code: Option<i32> },

    #[error("directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(
        || "no exit code (terminated by signal)".to_string(),
        |c| format!("status {c}"),
    )
}
