//! Generative-language provider adapters for pancake.
//!
//! Each provider implements [`pancake_core::ContentGenerator`] over an
//! [`HttpBackend`](http::HttpBackend). Production code uses the reqwest
//! backend; tests swap in a canned backend that records requests.
//!
//! # Usage
//!
//! ```rust,ignore
//! let generator = pancake_genai::build_generator(&config, ProviderKind::Gemini)?;
//! let reply = generator.generate(&transcript).await?;
//! ```

mod chatgpt;
mod gemini;
pub mod http;

pub use chatgpt::ChatGptClient;
pub use gemini::GeminiClient;
pub use http::{HttpBackend, HttpReply, ReqwestBackend};

use pancake_core::{Config, ConfigError, ContentGenerator, ProviderKind};

/// Build the generator for `kind` from the user's configuration.
///
/// Provider settings are validated first so a missing key is reported before
/// any request is attempted.
pub fn build_generator(
    config: &Config,
    kind: ProviderKind,
) -> Result<Box<dyn ContentGenerator>, ConfigError> {
    match kind {
        ProviderKind::Gemini => Ok(Box::new(GeminiClient::new(
            &config.gemini,
            ReqwestBackend::new(),
        )?)),
        ProviderKind::ChatGpt => Ok(Box::new(ChatGptClient::new(
            &config.chatgpt,
            ReqwestBackend::new(),
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config(body: &str) -> Config {
        let mut config = Config::parse(body, Path::new("test.toml")).unwrap();
        config.resolve(Path::new("/home/dev")).unwrap();
        config
    }

    #[test]
    fn missing_key_fails_before_any_request() {
        let config = config("home = \"/srv\"");
        let err = build_generator(&config, ProviderKind::Gemini).err().unwrap();
        assert!(matches!(
            err,
            ConfigError::MissingProviderSetting { key: "api_key", .. }
        ));
    }

    #[test]
    fn builds_each_provider_when_configured() {
        let config = config(
            "home = \"/srv\"\n[gemini]\napi_key = \"g\"\n[chatgpt]\napi_key = \"c\"\n",
        );
        assert!(build_generator(&config, ProviderKind::Gemini).is_ok());
        assert!(build_generator(&config, ProviderKind::ChatGpt).is_ok());
    }
}
