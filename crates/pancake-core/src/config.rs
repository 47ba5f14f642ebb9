//! Configuration model for pancake.
//!
//! The configuration is a single TOML document in the user's home directory.
//! It is loaded once per invocation by the composition root and handed to
//! handlers by reference; the only in-process mutation is the installed-tools
//! table, which is persisted immediately after it changes.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::Project;
use crate::paths::{PathError, expand_home, home_dir};

/// Commented starter configuration written by `pancake config init`.
pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/pancake.toml");

/// Environment variable that replaces the Gemini API key from the file.
pub const GEMINI_KEY_ENV_VAR: &str = "PANCAKE_GEMINI_API_KEY";

/// Environment variable that replaces the ChatGPT API key from the file.
pub const CHATGPT_KEY_ENV_VAR: &str = "PANCAKE_CHATGPT_API_KEY";

const DEFAULT_GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";
const DEFAULT_CHATGPT_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_CHATGPT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_CONTEXT: &str = "You are a helpful assistant that translates natural language \
                               into executable shell commands.";

/// Errors raised while loading, validating or persisting the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("Configuration file not found at {0}. Run 'pancake config init' to create one.")]
    NotFound(PathBuf),

    /// The configuration file exists but could not be read.
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// The configuration file is not valid TOML or has the wrong shape.
    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// The configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// The configuration could not be written back to disk.
    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// `home` is missing or blank.
    #[error("`home` must be set in the configuration")]
    MissingHome,

    /// A project name was not declared under `[projects]`.
    #[error("Project '{0}' not found in configuration")]
    UnknownProject(String),

    /// A provider setting required by `pancake ai` is empty.
    #[error(
        "{provider} {key} is not set.\n\
         Please run 'pancake config edit' to open the configuration file and add it.\n\n\
         Example configuration in pancake.toml:\n{example}"
    )]
    MissingProviderSetting {
        provider: &'static str,
        key: &'static str,
        example: &'static str,
    },

    /// A provider endpoint is not a valid URL.
    #[error("{provider} url '{url}' is invalid: {reason}")]
    InvalidProviderUrl {
        provider: &'static str,
        url: String,
        reason: String,
    },

    /// The home directory could not be resolved.
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Generative-language provider used by `pancake ai`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini `generateContent` endpoint.
    #[default]
    Gemini,
    /// OpenAI chat completions endpoint.
    ChatGpt,
}

impl ProviderKind {
    /// Human-readable provider name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::ChatGpt => "ChatGPT",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "chatgpt" | "openai" => Ok(Self::ChatGpt),
            other => Err(format!("unknown provider '{other}' (expected gemini or chatgpt)")),
        }
    }
}

/// Settings for the Gemini provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub api_key: String,
    pub url: String,
    pub temperature: f64,
    pub context: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            url: DEFAULT_GEMINI_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            context: DEFAULT_CONTEXT.to_string(),
        }
    }
}

impl GeminiSettings {
    const EXAMPLE: &'static str = "[gemini]\n\
         api_key = \"YOUR_API_KEY_HERE\"\n\
         url = \"https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent\"\n\
         temperature = 0.7";

    /// Check that the settings needed for a request are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("Gemini", "api_key", &self.api_key, Self::EXAMPLE)?;
        require("Gemini", "url", &self.url, Self::EXAMPLE)
    }
}

/// Settings for the ChatGPT provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatGptSettings {
    pub api_key: String,
    pub model: String,
    pub url: String,
    pub temperature: f64,
    pub context: String,
}

impl Default for ChatGptSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_CHATGPT_MODEL.to_string(),
            url: DEFAULT_CHATGPT_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            context: DEFAULT_CONTEXT.to_string(),
        }
    }
}

impl ChatGptSettings {
    const EXAMPLE: &'static str = "[chatgpt]\n\
         api_key = \"YOUR_API_KEY_HERE\"\n\
         model = \"gpt-4o-mini\"\n\
         url = \"https://api.openai.com/v1/chat/completions\"\n\
         temperature = 0.7";

    /// Check that the settings needed for a request are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("ChatGPT", "api_key", &self.api_key, Self::EXAMPLE)?;
        require("ChatGPT", "url", &self.url, Self::EXAMPLE)?;
        require("ChatGPT", "model", &self.model, Self::EXAMPLE)
    }
}

fn require(
    provider: &'static str,
    key: &'static str,
    value: &str,
    example: &'static str,
) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingProviderSetting {
            provider,
            key,
            example,
        });
    }
    Ok(())
}

/// The user's pancake configuration.
///
/// Field order matters for serialization: plain values must precede tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory projects are cloned into, as written in the file.
    pub home: String,
    /// Editor command used by `project open`.
    #[serde(default)]
    pub code_editor: String,
    /// Provider used by `pancake ai` unless overridden on the command line.
    #[serde(default)]
    pub ai_provider: ProviderKind,
    /// Installed tools (name -> version label).
    #[serde(default)]
    pub tools: BTreeMap<String, String>,
    /// Declared projects keyed by unique name.
    #[serde(default)]
    pub projects: BTreeMap<String, Project>,
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub chatgpt: ChatGptSettings,
    /// `home` with `$HOME` / `~` expanded; filled in by [`Config::resolve`].
    #[serde(skip)]
    resolved_home: PathBuf,
    /// API keys as read from the file, kept while an environment override
    /// is active so [`Config::save`] never writes the override to disk.
    #[serde(skip)]
    file_keys: FileKeys,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct FileKeys {
    gemini: Option<String>,
    chatgpt: Option<String>,
}

impl Config {
    /// Load the configuration from `path`, applying environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;

        let mut config = Self::parse(&raw, path)?;
        config.resolve(&home_dir()?)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        debug!(
            path = %path.display(),
            projects = config.projects.len(),
            tools = config.tools.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse TOML text. `origin` is only used in error messages.
    pub fn parse(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Expand the `home` entry against the user's home directory.
    pub fn resolve(&mut self, user_home: &Path) -> Result<(), ConfigError> {
        if self.home.trim().is_empty() {
            return Err(ConfigError::MissingHome);
        }
        self.resolved_home = expand_home(Path::new(self.home.trim()), user_home);
        Ok(())
    }

    /// Replace API keys with values from the environment when present.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(GEMINI_KEY_ENV_VAR).filter(|k| !k.is_empty()) {
            debug!("Using Gemini API key from {GEMINI_KEY_ENV_VAR}");
            let original = std::mem::replace(&mut self.gemini.api_key, key);
            self.file_keys.gemini.get_or_insert(original);
        }
        if let Some(key) = lookup(CHATGPT_KEY_ENV_VAR).filter(|k| !k.is_empty()) {
            debug!("Using ChatGPT API key from {CHATGPT_KEY_ENV_VAR}");
            let original = std::mem::replace(&mut self.chatgpt.api_key, key);
            self.file_keys.chatgpt.get_or_insert(original);
        }
    }

    /// Persist the configuration atomically (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let mut on_disk = self.clone();
        if let Some(key) = &self.file_keys.gemini {
            on_disk.gemini.api_key.clone_from(key);
        }
        if let Some(key) = &self.file_keys.chatgpt {
            on_disk.chatgpt.api_key.clone_from(key);
        }
        let body =
            toml::to_string_pretty(&on_disk).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        let write_err = |e: io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, body).map_err(write_err)?;
        fs::rename(&temp_path, path).map_err(write_err)?;

        debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Resolved projects home directory.
    pub fn home_dir(&self) -> &Path {
        &self.resolved_home
    }

    /// Look up a declared project.
    pub fn project(&self, name: &str) -> Result<&Project, ConfigError> {
        self.projects
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProject(name.to_string()))
    }

    /// Working directory of a project: `home/<name>`.
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.resolved_home.join(name)
    }

    /// Install location handed to the package manager.
    pub fn tools_dir(&self) -> PathBuf {
        self.resolved_home.join("tools")
    }

    /// File holding the name -> PID record of launched projects.
    pub fn process_record_path(&self) -> PathBuf {
        self.resolved_home.join("pids.json")
    }

    /// Record a successfully installed tool.
    pub fn add_tool(&mut self, name: &str) {
        self.tools
            .entry(name.to_string())
            .or_insert_with(|| "latest".to_string());
    }

    /// Forget an uninstalled tool. Returns whether it was listed.
    pub fn remove_tool(&mut self, name: &str) -> bool {
        self.tools.remove(name).is_some()
    }
}
