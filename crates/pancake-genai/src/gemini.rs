//! Gemini `generateContent` adapter.

use async_trait::async_trait;
use pancake_core::{
    ApiError, ConfigError, ContentGenerator, GeminiSettings, GenerateError, Role, Transcript,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::http::{HttpBackend, HttpReply};

const PROVIDER: &str = "Gemini";

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

// ============================================================================
// Client
// ============================================================================

/// Gemini content generator.
pub struct GeminiClient<B> {
    backend: B,
    endpoint: Url,
    temperature: f64,
    context: String,
}

impl<B: HttpBackend> GeminiClient<B> {
    /// Validate `settings` and build a client that posts through `backend`.
    pub fn new(settings: &GeminiSettings, backend: B) -> Result<Self, ConfigError> {
        settings.validate()?;
        let mut endpoint =
            Url::parse(settings.url.trim()).map_err(|e| ConfigError::InvalidProviderUrl {
                provider: PROVIDER,
                url: settings.url.clone(),
                reason: e.to_string(),
            })?;
        endpoint
            .query_pairs_mut()
            .append_pair("key", settings.api_key.trim());

        Ok(Self {
            backend,
            endpoint,
            temperature: settings.temperature,
            context: settings.context.trim().to_string(),
        })
    }

    fn request_body<'a>(&'a self, transcript: &'a Transcript) -> GenerateRequest<'a> {
        let contents = transcript
            .entries()
            .iter()
            .filter_map(|entry| {
                let role = match entry.role {
                    Role::User => "user",
                    Role::Model => "model",
                    Role::System => return None,
                };
                Some(Content {
                    role,
                    parts: vec![Part { text: &entry.text }],
                })
            })
            .collect();

        let mut system_parts: Vec<Part<'a>> = transcript
            .system_texts()
            .map(|text| Part { text })
            .collect();
        if !self.context.is_empty() {
            system_parts.push(Part {
                text: &self.context,
            });
        }

        GenerateRequest {
            contents,
            system_instruction: (!system_parts.is_empty()).then_some(SystemInstruction {
                parts: system_parts,
            }),
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        }
    }
}

#[async_trait]
impl<B: HttpBackend> ContentGenerator for GeminiClient<B> {
    async fn generate(&self, transcript: &Transcript) -> Result<String, GenerateError> {
        let body = serde_json::to_value(self.request_body(transcript))
            .map_err(|e| GenerateError::Decode(e.to_string()))?;

        debug!(turns = transcript.len(), "Sending Gemini request");
        let reply = self.backend.post_json(&self.endpoint, None, &body).await?;
        interpret(reply)
    }
}

fn interpret(reply: HttpReply) -> Result<String, GenerateError> {
    if !reply.is_success() {
        return Err(match serde_json::from_str::<ErrorEnvelope>(&reply.body) {
            Ok(ErrorEnvelope { error }) => api_error(error),
            Err(_) => GenerateError::HttpStatus {
                status: reply.status,
                body: reply.body,
            },
        });
    }

    let response: GenerateResponse =
        serde_json::from_str(&reply.body).map_err(|e| GenerateError::Decode(e.to_string()))?;

    // A 2xx reply can still carry an error object.
    if let Some(error) = response.error {
        return Err(api_error(error));
    }

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(GenerateError::EmptyResponse)
}

fn api_error(error: ErrorBody) -> GenerateError {
    GenerateError::Api(ApiError {
        code: error.code,
        message: error.message,
        status: error.status,
    })
}
