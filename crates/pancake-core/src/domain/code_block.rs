//! Fenced code-block extraction from model replies.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([^\n`]*)\n(.*?)\n?```").expect("fence pattern is valid")
});

/// Language of an extracted block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Language {
    /// Untagged, `sh`, `bash` or `shell` blocks.
    Shell,
    /// `python` / `py` blocks.
    Python,
    /// Any other fence tag, lowercased.
    Other(String),
    /// The reply had no fenced block.
    Text,
}

impl Language {
    fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "" | "sh" | "bash" | "shell" => Self::Shell,
            "python" | "py" => Self::Python,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether pancake knows an interpreter for this language.
    pub const fn is_runnable(&self) -> bool {
        matches!(self, Self::Shell | Self::Python)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shell => f.write_str("bash"),
            Self::Python => f.write_str("python"),
            Self::Other(tag) => f.write_str(tag),
            Self::Text => f.write_str("text"),
        }
    }
}

/// Content pulled out of a reply for copy/run actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Language,
    pub code: String,
}

/// Return the first fenced block of `reply`, or the whole trimmed reply as text.
pub fn extract_code_block(reply: &str) -> CodeBlock {
    match FENCE.captures(reply) {
        Some(caps) => CodeBlock {
            language: Language::from_tag(&caps[1]),
            code: caps[2].trim().to_string(),
        },
        None => CodeBlock {
            language: Language::Text,
            code: reply.trim().to_string(),
        },
    }
}
