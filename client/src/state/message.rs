//! Chat message model.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use serde::{Deserialize, Serialize};

use crate::util::clock::now_ms;

pub const WELCOME_ID: &str = "welcome";
pub const WELCOME_TEXT: &str = "👋 Hi Welcome to ASHIYA-AI help chat AI 🥷🇱🇰";

/// Which kind of image a message carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Generated,
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

/// A single chat bubble.
///
/// Created on each user action or server reply. Placeholders are mutated in
/// place when their result arrives; nothing removes a single message except
/// retry (which drops errored ones).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    pub is_user: bool,
    /// Epoch milliseconds.
    pub timestamp: f64,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_type: Option<ImageKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_text: Option<String>,
    #[serde(default)]
    pub is_image_loading: bool,
    #[serde(default)]
    pub is_audio_loading: bool,
}

impl Message {
    fn new(content: impl Into<String>, is_user: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            is_user,
            timestamp: now_ms(),
            is_error: false,
            retry_message: None,
            generated_image: None,
            image_prompt: None,
            image_type: None,
            audio_url: None,
            audio_text: None,
            is_image_loading: false,
            is_audio_loading: false,
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, true)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, false)
    }

    /// Assistant error bubble offering a one-click resend of `retry`.
    #[must_use]
    pub fn error(content: impl Into<String>, retry: impl Into<String>) -> Self {
        Self { is_error: true, retry_message: Some(retry.into()), ..Self::assistant(content) }
    }

    /// The greeting shown in an empty session.
    #[must_use]
    pub fn welcome() -> Self {
        Self { id: WELCOME_ID.to_owned(), ..Self::assistant(WELCOME_TEXT) }
    }

    /// True while an image or audio result is still pending.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_image_loading || self.is_audio_loading
    }

    /// True when this bubble can be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.is_error && self.retry_message.as_deref().is_some_and(|r| !r.is_empty())
    }
}

/// Initial message list for a fresh or cleared session.
#[must_use]
pub fn default_messages() -> Vec<Message> {
    vec![Message::welcome()]
}
