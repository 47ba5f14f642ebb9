//! Host platform detection.

use std::fmt;

/// Operating system family that decides which launcher, opener and package
/// manager are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other(&'static str),
}

impl Platform {
    /// Platform of the running binary.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a Rust `target_os` name to a platform family.
    pub fn from_os(os: &'static str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => f.write_str("windows"),
            Self::MacOs => f.write_str("macos"),
            Self::Linux => f.write_str("linux"),
            Self::Other(os) => f.write_str(os),
        }
    }
}
