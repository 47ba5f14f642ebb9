//! HTTP backend abstraction for provider calls.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest and makes exactly one attempt per call: no retry, no
//! backoff and no request timeout.

use async_trait::async_trait;
use pancake_core::GenerateError;
use serde_json::Value;
use tracing::debug;
use url::Url;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Raw HTTP outcome handed back to the provider adapter for interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Trait for HTTP backends that can POST a JSON body.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST `body` to `url`, optionally with a bearer token.
    ///
    /// Only transport failures are errors here; any HTTP status is returned
    /// as a reply so the adapter can decode provider error objects.
    async fn post_json(
        &self,
        url: &Url,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<HttpReply, GenerateError>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
#[derive(Debug, Clone, Default)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json(
        &self,
        url: &Url,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<HttpReply, GenerateError> {
        let mut request = self.client.post(url.clone()).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GenerateError::Transport(e.without_url().to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::Transport(e.without_url().to_string()))?;

        debug!(status, bytes = body.len(), "Provider responded");
        Ok(HttpReply { status, body })
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
