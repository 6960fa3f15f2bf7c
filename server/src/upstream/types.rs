//! Upstream types — wire reply and errors for the Chiku chat API.

use serde::Deserialize;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while talking to the upstream chat API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP request could not be sent or timed out.
    #[error("upstream request failed: {0}")]
    Request(String),

    /// The upstream API returned a non-success HTTP status.
    #[error("Chiku API returned {status}")]
    Status { status: u16 },

    /// The upstream response body was not valid JSON.
    #[error("upstream response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// REPLY
// =============================================================================

/// Body returned by the upstream chat API. Only `answer` is read; any other
/// fields are ignored. `answer` is kept as raw JSON so an odd type degrades
/// to the fallback instead of failing the parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpstreamReply {
    #[serde(default)]
    pub answer: Option<serde_json::Value>,
}

impl UpstreamReply {
    /// The answer, if it is a non-empty string.
    #[must_use]
    pub fn answer_text(&self) -> Option<&str> {
        self.answer
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .filter(|a| !a.is_empty())
    }
}

// =============================================================================
// CHIKU API TRAIT
// =============================================================================

/// Async seam over the upstream chat API. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ChikuApi: Send + Sync {
    /// Forward one already-truncated prompt upstream.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] if the request fails, the status is not a
    /// success, or the body is not JSON.
    async fn ask(&self, message: &str) -> Result<UpstreamReply, UpstreamError>;
}
