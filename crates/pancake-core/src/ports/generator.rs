//! Content generator port.
//!
//! One method: submit the whole transcript, get back a single text reply or
//! a structured failure. Implementations make exactly one attempt; retrying
//! is left to the user through the session loop.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Transcript;

/// Error object reported by a provider in its response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("api error: {message} (code: {code}, status: {status})")]
pub struct ApiError {
    pub code: i64,
    pub message: String,
    pub status: String,
}

/// Why a generation request produced no reply.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The request never completed (DNS, TLS, connection reset, ...).
    #[error("failed to send request: {0}")]
    Transport(String),

    /// Non-success HTTP status without a recognizable error object.
    #[error("provider returned non-success status {status}\nResponse: {body}")]
    HttpStatus { status: u16, body: String },

    /// The provider described the failure itself.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Success status, but no candidate text to return.
    #[error("received an empty or invalid response from the model")]
    EmptyResponse,

    /// The body could not be decoded into the provider's schema.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Something that can continue a conversation.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate the next model turn for `transcript`.
    async fn generate(&self, transcript: &Transcript) -> Result<String, GenerateError>;
}

#[async_trait]
impl<G: ContentGenerator + ?Sized> ContentGenerator for Box<G> {
    async fn generate(&self, transcript: &Transcript) -> Result<String, GenerateError> {
        (**self).generate(transcript).await
    }
}
