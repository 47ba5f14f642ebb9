//! Launch a shell command in a new terminal window.
//!
//! The returned PID belongs to the launcher (`gnome-terminal`, `osascript`,
//! `cmd`), not to the project process it eventually starts.

use std::path::Path;

use crate::command::CommandSpec;
use crate::error::ProcessError;
use crate::platform::Platform;

/// Build the launcher invocation that runs `script` inside `dir` in a new
/// terminal window on `platform`.
///
/// `dir` is quoted for the target shell; `script` is passed through as-is.
pub fn terminal_command(platform: Platform, dir: &Path, script: &str) -> CommandSpec {
    let dir = dir.to_string_lossy();
    match platform {
        Platform::Windows => CommandSpec::new("cmd").args([
            "/c".to_string(),
            "start".to_string(),
            "cmd".to_string(),
            "/k".to_string(),
            format!("cd /d \"{dir}\" && {script}"),
        ]),
        Platform::MacOs => {
            let line = format!("cd {} && {script}", sh_quote(&dir));
            CommandSpec::new("osascript").arg("-e").arg(format!(
                "tell application \"Terminal\" to do script \"{}\"",
                applescript_escape(&line)
            ))
        }
        Platform::Linux | Platform::Other(_) => CommandSpec::new("gnome-terminal")
            .args(["--", "sh", "-c"])
            .arg(format!("cd {} && {script}", sh_quote(&dir))),
    }
}

/// Single-quote `value` for a POSIX shell.
fn sh_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Escape `value` for use inside an AppleScript string literal.
fn applescript_escape(value: &str) -> String {
    value.replace('\\', r"\\").replace('"', r#"\""#)
}

/// Open a new terminal window running `script` in `dir` and return the
/// launcher's PID.
pub fn launch_in_new_terminal(dir: &Path, script: &str) -> Result<u32, ProcessError> {
    if !dir.is_dir() {
        return Err(ProcessError::MissingDirectory(dir.to_path_buf()));
    }
    terminal_command(Platform::current(), dir, script).spawn_detached()
}
