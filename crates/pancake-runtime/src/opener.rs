//! Open paths in the configured code editor or the OS default application.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::command::CommandSpec;
use crate::error::ProcessError;
use crate::platform::Platform;

/// Build the editor invocation. `editor` may carry its own arguments
/// (`"code -n"`), which precede the path.
pub fn editor_command(editor: &str, path: &Path) -> Option<CommandSpec> {
    let mut words = editor.split_whitespace();
    let program = words.next()?;
    Some(
        CommandSpec::new(program)
            .args(words)
            .arg(path.to_string_lossy()),
    )
}

/// Open `path` in `editor` and wait for the editor command to return.
pub async fn open_in_editor(editor: &str, path: &Path) -> Result<(), ProcessError> {
    let cmd = editor_command(editor, path).ok_or_else(|| {
        ProcessError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no code editor configured",
        ))
    })?;
    debug!(command = %cmd, "Opening in editor");
    cmd.run().await
}

/// The OS "open this file" invocation for `platform`.
pub fn default_app_command(platform: Platform, path: &Path) -> CommandSpec {
    let program = match platform {
        Platform::Windows => "notepad.exe",
        Platform::MacOs => "open",
        Platform::Linux | Platform::Other(_) => "xdg-open",
    };
    CommandSpec::new(program).arg(path.to_string_lossy())
}

/// Hand `path` to the OS default application without waiting for it.
pub fn open_with_default_app(path: &Path) -> Result<u32, ProcessError> {
    default_app_command(Platform::current(), path).spawn_detached()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_arguments_precede_the_path() {
        let cmd = editor_command("code -n", Path::new("/srv/pancake/app")).unwrap();
        assert_eq!(cmd.program, "code");
        assert_eq!(cmd.args, ["-n", "/srv/pancake/app"]);
    }

    #[test]
    fn blank_editor_yields_nothing() {
        assert!(editor_command("  ", Path::new("/srv")).is_none());
    }

    #[test]
    fn default_app_per_platform() {
        let path = Path::new("/home/dev/pancake.toml");
        assert_eq!(default_app_command(Platform::Linux, path).program, "xdg-open");
        assert_eq!(default_app_command(Platform::MacOs, path).program, "open");
        assert_eq!(
            default_app_command(Platform::Windows, path).program,
            "notepad.exe"
        );
    }
}
