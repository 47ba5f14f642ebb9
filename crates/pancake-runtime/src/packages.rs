//! System package-manager wrapper.
//!
//! Windows uses Chocolatey, macOS and Linux use Homebrew. Installs are
//! directed at `<home>/tools`: Homebrew through `HOMEBREW_PREFIX`,
//! Chocolatey through `--cache-location`.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::command::CommandSpec;
use crate::error::ProcessError;
use crate::platform::Platform;

const HOMEBREW_INSTALL_SCRIPT: &str = "/bin/bash -c \"$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)\"";

const CHOCOLATEY_INSTALL_SCRIPT: &str = "Set-ExecutionPolicy Bypass -Scope Process -Force; \
     [System.Net.ServicePointManager]::SecurityProtocol = \
     [System.Net.ServicePointManager]::SecurityProtocol -bor 3072; \
     iex ((New-Object System.Net.WebClient).DownloadString('https://chocolatey.org/install.ps1'))";

/// Supported package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Chocolatey,
    Homebrew,
}

/// Operations forwarded to the package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOperation {
    Install,
    Uninstall,
    Upgrade,
    Search,
    Info,
}

impl ToolOperation {
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Uninstall => "uninstall",
            Self::Upgrade => "upgrade",
            Self::Search => "search",
            Self::Info => "info",
        }
    }
}

impl PackageManager {
    /// Package manager for `platform`.
    pub fn for_platform(platform: Platform) -> Result<Self, ProcessError> {
        match platform {
            Platform::Windows => Ok(Self::Chocolatey),
            Platform::MacOs | Platform::Linux => Ok(Self::Homebrew),
            Platform::Other(os) => Err(ProcessError::UnsupportedPlatform(os.to_string())),
        }
    }

    /// Package manager for the running platform.
    pub fn detect() -> Result<Self, ProcessError> {
        Self::for_platform(Platform::current())
    }

    pub const fn program(self) -> &'static str {
        match self {
            Self::Chocolatey => "choco",
            Self::Homebrew => "brew",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Chocolatey => "Chocolatey",
            Self::Homebrew => "Homebrew",
        }
    }

    /// Build the invocation for `op` on `arg`, installing under `tools_dir`.
    pub fn command(self, op: ToolOperation, arg: &str, tools_dir: &Path) -> CommandSpec {
        let tools = tools_dir.to_string_lossy();
        let base = CommandSpec::new(self.program()).arg(op.verb()).args(arg.split_whitespace());

        match (self, op) {
            (Self::Homebrew, ToolOperation::Search)
            | (Self::Chocolatey, ToolOperation::Search | ToolOperation::Info) => base,
            (Self::Homebrew, _) => base.env("HOMEBREW_PREFIX", tools),
            (Self::Chocolatey, _) => base.arg("--cache-location").arg(tools),
        }
    }

    /// `<pm> -v`, used to probe whether the package manager is installed.
    pub fn version_command(self) -> CommandSpec {
        CommandSpec::new(self.program()).arg("-v")
    }

    /// The official bootstrap script for this package manager.
    pub fn setup_command(self) -> CommandSpec {
        match self {
            Self::Chocolatey => CommandSpec::new("powershell")
                .args(["-NoProfile", "-ExecutionPolicy", "Bypass", "-Command"])
                .arg(CHOCOLATEY_INSTALL_SCRIPT),
            Self::Homebrew => CommandSpec::shell(HOMEBREW_INSTALL_SCRIPT),
        }
    }

    /// Whether the package manager answers `-v`.
    pub async fn is_available(self) -> bool {
        let available = self.version_command().run_quiet().await;
        debug!(manager = self.display_name(), available, "Probed package manager");
        available
    }

    /// Run the bootstrap script, streaming its output.
    pub async fn setup(self) -> Result<(), ProcessError> {
        self.setup_command().run().await
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
