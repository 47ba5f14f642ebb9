//! Command description and execution.
//!
//! A [`CommandSpec`] is plain data: program, arguments, extra environment and
//! working directory. Callers build one, optionally print it, then run it
//! either streaming to the terminal or quietly.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::ProcessError;

/// A child process to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            dir: None,
        }
    }

    /// `sh -c <script>`, the way project build and run commands are executed.
    pub fn shell(script: impl Into<String>) -> Self {
        Self::new("sh").arg("-c").arg(script)
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn to_command(&self) -> Result<Command, ProcessError> {
        if let Some(dir) = &self.dir
            && !dir.is_dir()
        {
            return Err(ProcessError::MissingDirectory(dir.clone()));
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        Ok(cmd)
    }

    fn spawn_error(&self, source: std::io::Error) -> ProcessError {
        ProcessError::Spawn {
            program: self.program.clone(),
            source,
        }
    }

    /// Run to completion with stdout/stderr attached to the terminal.
    pub async fn run(&self) -> Result<(), ProcessError> {
        debug!(command = %self, "Running command");
        let status = self
            .to_command()?
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(ProcessError::Exit {
                command: self.to_string(),
                code: status.code(),
            })
        }
    }

    /// Run to completion with all output discarded.
    ///
    /// Returns whether the program could be started and exited successfully.
    pub async fn run_quiet(&self) -> bool {
        let Ok(mut cmd) = self.to_command() else {
            return false;
        };
        let status = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;
        debug!(command = %self, ?status, "Quiet command finished");
        status.is_ok_and(|s| s.success())
    }

    /// Start the program without waiting for it and return its PID.
    pub fn spawn_detached(&self) -> Result<u32, ProcessError> {
        let child = self
            .to_command()?
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        // Dropping a tokio child leaves the process running.
        let pid = child.id().unwrap_or_default();
        debug!(command = %self, pid, "Spawned detached command");
        Ok(pid)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{key}={value} ")?;
        }
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}
