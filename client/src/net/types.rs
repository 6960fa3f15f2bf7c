//! Wire DTOs for the relay and media command endpoints.
//!
//! DESIGN
//! ======
//! Response fields are all optional: neither endpoint guarantees a shape, so
//! the session validates on read and treats a missing field as a failure
//! instead of trusting the decoded struct.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Failures talking to the relay or the media command endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The body was not the JSON we expected.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// No endpoint is configured for this kind of request.
    #[error("endpoint not configured: {0}")]
    Unavailable(&'static str),
}

// =============================================================================
// CHAT
// =============================================================================

/// Body sent to the relay: the full serialized history, untruncated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Relay response. `answer` on success, `error` alongside a non-2xx status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatReply {
    /// The answer text, if present and non-empty.
    #[must_use]
    pub fn answer_text(&self) -> Option<&str> {
        self.answer.as_deref().filter(|a| !a.is_empty())
    }
}

// =============================================================================
// MEDIA COMMANDS
// =============================================================================

/// Command names understood by the media endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    ImageGen,
    Tts,
    Neko,
    Waifu,
    Hug,
    Pat,
    Kiss,
    Wave,
    Smile,
    Blush,
    Poke,
    Dance,
}

/// Body sent to the media endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: CommandKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Media endpoint response. Image commands fill `images`, TTS fills
/// `audio_data_url`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResponse {
    /// First non-empty image URL, if any.
    #[must_use]
    pub fn first_image(&self) -> Option<&str> {
        self.images
            .as_deref()
            .and_then(|urls| urls.iter().map(String::as_str).find(|u| !u.is_empty()))
    }

    /// Audio data URL, if present and non-empty.
    #[must_use]
    pub fn audio(&self) -> Option<&str> {
        self.audio_data_url.as_deref().filter(|a| !a.is_empty())
    }
}
