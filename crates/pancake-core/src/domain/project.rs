//! Project declarations.

use serde::{Deserialize, Serialize};

/// A project declared under `[projects.<name>]`.
///
/// The name is the table key and is unique within a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Remote repository the project is cloned from.
    pub remote_ssh_url: String,
    /// Free-form project type (e.g. "web", "service").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Port the project listens on once running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Shell command that builds the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    /// Shell command that runs the project.
    #[serde(default, alias = "start", skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
}

impl Project {
    /// Build command, if one is declared and non-blank.
    pub fn build_command(&self) -> Option<&str> {
        non_blank(self.build.as_deref())
    }

    /// Run command, if one is declared and non-blank.
    pub fn run_command(&self) -> Option<&str> {
        non_blank(self.run.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
