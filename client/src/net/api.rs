//! Backend seam for the relay and the media command endpoint.
//!
//! Client-side (hydrate): [`GlooBackend`] issues real HTTP calls via
//! `gloo-net`. Native front-ends implement [`ChikuBackend`] with their own
//! HTTP client.
//!
//! ERROR HANDLING
//! ==============
//! Backends return `Result<_, ApiError>` and never panic. The session turns
//! every error into an error message bubble, so a backend only has to say
//! what went wrong.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ApiError, ChatReply, ChatRequest, CommandRequest, CommandResponse};

/// Transport used by the chat session.
///
/// Futures are `?Send`: browser fetch futures cannot cross threads and the
/// session itself is single-threaded.
#[async_trait::async_trait(?Send)]
pub trait ChikuBackend {
    /// Send the serialized history to the relay.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status, or
    /// an unparseable body.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;

    /// Run a media command (image generation, TTS, reaction image).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status, or
    /// an unparseable body.
    async fn command(&self, request: &CommandRequest) -> Result<CommandResponse, ApiError>;
}

/// Build the error for a non-success response, preferring the server's
/// `{"error": "..."}` message over the raw body.
#[must_use]
pub fn status_error(status: u16, body: &str) -> ApiError {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: Option<String>,
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| body.trim().to_owned());
    ApiError::Status { status, message }
}

// =============================================================================
// BROWSER BACKEND
// =============================================================================

/// `gloo-net` backend posting JSON to the relay and media endpoints.
#[cfg(feature = "hydrate")]
#[derive(Clone, Debug)]
pub struct GlooBackend {
    pub chat_url: String,
    pub commands_url: Option<String>,
}

#[cfg(feature = "hydrate")]
impl GlooBackend {
    #[must_use]
    pub fn new(chat_url: impl Into<String>, commands_url: Option<String>) -> Self {
        Self { chat_url: chat_url.into(), commands_url }
    }

    async fn post_json<B, T>(url: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let resp = gloo_net::http::Request::post(url)
            .json(body)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        if !resp.ok() {
            let text = resp.text().await.unwrap_or_default();
            return Err(status_error(resp.status(), &text));
        }
        resp.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[cfg(feature = "hydrate")]
#[async_trait::async_trait(?Send)]
impl ChikuBackend for GlooBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        Self::post_json(&self.chat_url, request).await
    }

    async fn command(&self, request: &CommandRequest) -> Result<CommandResponse, ApiError> {
        let url = self
            .commands_url
            .as_deref()
            .ok_or(ApiError::Unavailable("media commands"))?;
        Self::post_json(url, request).await
    }
}
