//! Git checkout synchronization.
//!
//! A project directory is either cloned fresh or pulled, never both. A
//! directory without a `.git` folder is treated as a partial checkout and is
//! removed before cloning.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::command::CommandSpec;
use crate::error::ProcessError;

/// What [`sync`] will do for one checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPlan {
    Clone { remote: String, dir: PathBuf },
    Pull { dir: PathBuf },
}

impl SyncPlan {
    /// Decide between clone and pull from the state of `dir` on disk.
    pub fn for_checkout(dir: &Path, remote: &str) -> Self {
        if dir.is_dir() && dir.join(".git").exists() {
            Self::Pull {
                dir: dir.to_path_buf(),
            }
        } else {
            Self::Clone {
                remote: remote.to_string(),
                dir: dir.to_path_buf(),
            }
        }
    }

    /// The git invocation for this plan.
    pub fn command(&self) -> CommandSpec {
        match self {
            Self::Clone { remote, dir } => CommandSpec::new("git")
                .arg("clone")
                .arg(remote.as_str())
                .arg(dir.to_string_lossy()),
            Self::Pull { dir } => CommandSpec::new("git").arg("pull").current_dir(dir),
        }
    }

    pub fn dir(&self) -> &Path {
        match self {
            Self::Clone { dir, .. } | Self::Pull { dir } => dir,
        }
    }
}

/// Execute `plan`, streaming git's output to the terminal.
pub async fn sync(plan: &SyncPlan) -> Result<(), ProcessError> {
    if let SyncPlan::Clone { dir, .. } = plan {
        if dir.exists() {
            debug!(dir = %dir.display(), "Removing partial checkout before clone");
            std::fs::remove_dir_all(dir)?;
        }
        if let Some(parent) = dir.parent() {
            std::fs::create_dir_all(parent)?;
        }
    }

    plan.command().run().await?;
    info!(dir = %plan.dir().display(), "Checkout synchronized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const REMOTE: &str = "git@github.com:example/app.git";

    #[test]
    fn missing_directory_plans_clone() {
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join("app");
        assert_eq!(
            SyncPlan::for_checkout(&dir, REMOTE),
            SyncPlan::Clone {
                remote: REMOTE.into(),
                dir: dir.clone()
            }
        );
    }

    #[test]
    fn directory_without_git_plans_clone() {
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join("app");
        fs::create_dir_all(&dir).unwrap();
        assert!(matches!(
            SyncPlan::for_checkout(&dir, REMOTE),
            SyncPlan::Clone { .. }
        ));
    }

    #[test]
    fn existing_checkout_plans_pull_in_place() {
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join("app");
        fs::create_dir_all(dir.join(".git")).unwrap();

        let plan = SyncPlan::for_checkout(&dir, REMOTE);
        assert_eq!(plan, SyncPlan::Pull { dir: dir.clone() });

        let cmd = plan.command();
        assert_eq!(cmd.args, ["pull"]);
        assert_eq!(cmd.dir.as_deref(), Some(dir.as_path()));
    }

    #[test]
    fn clone_command_targets_the_project_dir() {
        let plan = SyncPlan::Clone {
            remote: REMOTE.into(),
            dir: PathBuf::from("/srv/pancake/app"),
        };
        assert_eq!(
            plan.command().to_string(),
            format!("git clone {REMOTE} /srv/pancake/app")
        );
    }
}
