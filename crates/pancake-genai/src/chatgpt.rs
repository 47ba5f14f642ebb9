//! OpenAI chat-completions adapter.

use async_trait::async_trait;
use pancake_core::{
    ApiError, ChatGptSettings, ConfigError, ContentGenerator, GenerateError, Role, Transcript,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::http::{HttpBackend, HttpReply};

const PROVIDER: &str = "ChatGPT";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// ChatGPT content generator.
pub struct ChatGptClient<B> {
    backend: B,
    endpoint: Url,
    api_key: String,
    model: String,
    temperature: f64,
    context: String,
}

impl<B: HttpBackend> ChatGptClient<B> {
    /// Validate `settings` and build a client that posts through `backend`.
    pub fn new(settings: &ChatGptSettings, backend: B) -> Result<Self, ConfigError> {
        settings.validate()?;
        let endpoint =
            Url::parse(settings.url.trim()).map_err(|e| ConfigError::InvalidProviderUrl {
                provider: PROVIDER,
                url: settings.url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            backend,
            endpoint,
            api_key: settings.api_key.trim().to_string(),
            model: settings.model.trim().to_string(),
            temperature: settings.temperature,
            context: settings.context.trim().to_string(),
        })
    }

    fn request_body<'a>(&'a self, transcript: &'a Transcript) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(transcript.len() + 1);
        if !self.context.is_empty() {
            messages.push(Message {
                role: "system",
                content: &self.context,
            });
        }
        messages.extend(transcript.entries().iter().map(|entry| Message {
            role: match entry.role {
                Role::System => "system",
                Role::User => "user",
                Role::Model => "assistant",
            },
            content: &entry.text,
        }));

        ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl<B: HttpBackend> ContentGenerator for ChatGptClient<B> {
    async fn generate(&self, transcript: &Transcript) -> Result<String, GenerateError> {
        let body = serde_json::to_value(self.request_body(transcript))
            .map_err(|e| GenerateError::Decode(e.to_string()))?;

        debug!(model = %self.model, turns = transcript.len(), "Sending ChatGPT request");
        let reply = self
            .backend
            .post_json(&self.endpoint, Some(&self.api_key), &body)
            .await?;
        interpret(reply)
    }
}

fn interpret(reply: HttpReply) -> Result<String, GenerateError> {
    if !reply.is_success() {
        return Err(match serde_json::from_str::<ErrorEnvelope>(&reply.body) {
            Ok(ErrorEnvelope { error }) => api_error(reply.status, error),
            Err(_) => GenerateError::HttpStatus {
                status: reply.status,
                body: reply.body,
            },
        });
    }

    let response: ChatResponse =
        serde_json::from_str(&reply.body).map_err(|e| GenerateError::Decode(e.to_string()))?;

    // A 2xx reply can still carry an error object.
    if let Some(error) = response.error {
        return Err(api_error(reply.status, error));
    }

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(GenerateError::EmptyResponse)
}

/// The error object has no numeric code of its own; the HTTP status stands in.
fn api_error(status: u16, error: ErrorBody) -> GenerateError {
    GenerateError::Api(ApiError {
        code: i64::from(status),
        message: error.message,
        status: error.kind.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use serde_json::json;

    fn settings() -> ChatGptSettings {
        ChatGptSettings {
            api_key: "sk-test".into(),
            model: "gpt-4o-mini".into(),
            url: "https://example.test/v1/chat/completions".into(),
            temperature: 0.5,
            context: String::new(),
        }
    }

    fn transcript() -> Transcript {
        let mut t = Transcript::new("Be terse.");
        t.push_user("disk usage");
        t
    }

    #[tokio::test]
    async fn sends_bearer_and_maps_roles() {
        let backend = FakeBackend::new().with_reply(
            200,
            json!({"choices": [{"message": {"role": "assistant", "content": "du -sh ."}}]}),
        );
        let client = ChatGptClient::new(&settings(), backend).unwrap();

        let mut t = transcript();
        t.push_model("df -h");
        t.push_user("per directory");
        assert_eq!(client.generate(&t).await.unwrap(), "du -sh .");

        let requests = client.backend.requests();
        let request = &requests[0];
        assert_eq!(request.bearer.as_deref(), Some("sk-test"));
        assert!(request.url.query().is_none());
        assert_eq!(request.body["model"], "gpt-4o-mini");
        assert_eq!(request.body["temperature"], 0.5);

        let roles: Vec<_> = request.body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, ["system", "user", "assistant", "user"]);
    }

    #[tokio::test]
    async fn context_is_prepended_as_system_message() {
        let mut with_context = settings();
        with_context.context = "Answer with shell commands.".into();
        let client = ChatGptClient::new(&with_context, FakeBackend::new()).unwrap();

        let t = transcript();
        let body = serde_json::to_value(client.request_body(&t)).unwrap();
        assert_eq!(body["messages"][0]["content"], "Answer with shell commands.");
        assert_eq!(body["messages"][1]["content"], "Be terse.");
    }

    #[tokio::test]
    async fn error_object_uses_http_status_as_code() {
        let backend = FakeBackend::new().with_reply(
            401,
            json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error", "code": "invalid_api_key"}}),
        );
        let client = ChatGptClient::new(&settings(), backend).unwrap();

        match client.generate(&transcript()).await.unwrap_err() {
            GenerateError::Api(api) => {
                assert_eq!(api.code, 401);
                assert_eq!(api.status, "invalid_request_error");
                assert!(api.message.starts_with("Incorrect API key"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_object_in_success_reply_is_api_error() {
        let backend = FakeBackend::new().with_reply(
            200,
            json!({"error": {"message": "Rate limit reached", "type": "requests", "code": "rate_limit_exceeded"}}),
        );
        let client = ChatGptClient::new(&settings(), backend).unwrap();

        match client.generate(&transcript()).await.unwrap_err() {
            GenerateError::Api(api) => {
                assert_eq!(api.code, 200);
                assert_eq!(api.status, "requests");
                assert_eq!(api.message, "Rate limit reached");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn null_content_is_empty_response() {
        let backend = FakeBackend::new()
            .with_reply(200, json!({"choices": [{"message": {"content": null}}]}))
            .with_reply(200, json!({"choices": []}));
        let client = ChatGptClient::new(&settings(), backend).unwrap();

        for _ in 0..2 {
            assert!(matches!(
                client.generate(&transcript()).await.unwrap_err(),
                GenerateError::EmptyResponse
            ));
        }
    }

    #[tokio::test]
    async fn garbage_success_body_is_decode_error() {
        let backend = FakeBackend::new().with_raw_reply(200, "<html>");
        let client = ChatGptClient::new(&settings(), backend).unwrap();

        assert!(matches!(
            client.generate(&transcript()).await.unwrap_err(),
            GenerateError::Decode(_)
        ));
    }

    #[test]
    fn missing_model_is_rejected() {
        let mut no_model = settings();
        no_model.model = " ".into();
        let err = ChatGptClient::new(&no_model, FakeBackend::new()).err().unwrap();
        assert!(matches!(
            err,
            ConfigError::MissingProviderSetting { key: "model", .. }
        ));
    }
}
