//! Path utilities for pancake's per-user files.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

mod error;

use std::env;
use std::path::{Path, PathBuf};

pub use error::PathError;

/// File name of the configuration document in the user's home directory.
pub const CONFIG_FILE_NAME: &str = "pancake.toml";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV_VAR: &str = "PANCAKE_CONFIG";

/// Returns the current user's home directory.
pub fn home_dir() -> Result<PathBuf, PathError> {
    dirs::home_dir().ok_or(PathError::NoHomeDir)
}

/// Get the path of the configuration file.
///
/// Resolution order:
/// 1. `PANCAKE_CONFIG` environment variable (highest priority)
/// 2. `~/pancake.toml`
pub fn config_path() -> Result<PathBuf, PathError> {
    resolve_config_path(env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
}

fn resolve_config_path(override_path: Option<PathBuf>) -> Result<PathBuf, PathError> {
    match override_path {
        Some(path) if path.as_os_str().is_empty() => Err(PathError::EmptyPath),
        Some(path) => Ok(path),
        None => Ok(home_dir()?.join(CONFIG_FILE_NAME)),
    }
}

/// Expand `$HOME` anywhere in the path and a leading `~` against `home`.
pub fn expand_home(raw: &Path, home: &Path) -> PathBuf {
    let text = raw.to_string_lossy();
    let replaced = text.replace("$HOME", &home.to_string_lossy());

    if replaced == "~" {
        return home.to_path_buf();
    }
    if let Some(rest) = replaced
        .strip_prefix("~/")
        .or_else(|| replaced.strip_prefix("~\\"))
    {
        return home.join(rest);
    }
    PathBuf::from(replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_path_wins() {
        let path = resolve_config_path(Some(PathBuf::from("/tmp/custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn empty_override_is_rejected() {
        let err = resolve_config_path(Some(PathBuf::new())).unwrap_err();
        assert!(matches!(err, PathError::EmptyPath));
    }

    #[test]
    fn default_path_is_in_home() {
        let path = resolve_config_path(None).expect("home dir available in tests");
        assert!(path.ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn expands_dollar_home() {
        let home = Path::new("/home/dev");
        assert_eq!(
            expand_home(Path::new("$HOME/projects"), home),
            PathBuf::from("/home/dev/projects")
        );
    }

    #[test]
    fn expands_tilde_prefix_only() {
        let home = Path::new("/home/dev");
        assert_eq!(expand_home(Path::new("~"), home), PathBuf::from("/home/dev"));
        assert_eq!(
            expand_home(Path::new("~/code"), home),
            PathBuf::from("/home/dev/code")
        );
        assert_eq!(
            expand_home(Path::new("/srv/~cache"), home),
            PathBuf::from("/srv/~cache")
        );
    }
}
