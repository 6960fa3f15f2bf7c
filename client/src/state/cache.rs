//! Persisted session snapshot.
//!
//! DESIGN
//! ======
//! The snapshot is JSON under a single storage key and fully replaces any
//! earlier one. Reads go through all-optional records and are validated, so
//! a hand-edited, truncated or older-shaped cache degrades to a cache miss
//! instead of an error. Messages still loading are never written: reloading
//! would otherwise show a bubble stuck in its loading state forever.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use serde::{Deserialize, Serialize};

use super::history::HistoryLog;
use super::message::{ImageKind, Message};
use crate::util::clock::now_ms;
use crate::util::storage::KeyValueStore;

pub const CACHE_KEY: &str = "chiku-chat-cache";

/// Snapshot as written.
#[derive(Debug, Serialize)]
struct SessionCacheRef<'a> {
    messages: Vec<&'a Message>,
    history: &'a HistoryLog,
}

/// Snapshot as read back. Everything is optional until validated.
#[derive(Debug, Default, Deserialize)]
struct CachedSession {
    #[serde(default)]
    messages: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    history: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CachedMessage {
    id: Option<String>,
    content: Option<String>,
    is_user: Option<bool>,
    timestamp: Option<serde_json::Value>,
    is_error: Option<bool>,
    retry_message: Option<String>,
    generated_image: Option<String>,
    image_prompt: Option<String>,
    image_type: Option<serde_json::Value>,
    audio_url: Option<String>,
    audio_text: Option<String>,
}

impl CachedMessage {
    /// Validate into a [`Message`]. `id` and `content` are required; loading
    /// flags are always cleared. Unknown image kinds and non-numeric
    /// timestamps are dropped rather than rejecting the message.
    fn into_message(self) -> Option<Message> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let content = self.content?;
        Some(Message {
            id,
            content,
            is_user: self.is_user.unwrap_or(false),
            timestamp: self
                .timestamp
                .and_then(|t| t.as_f64())
                .unwrap_or_else(now_ms),
            is_error: self.is_error.unwrap_or(false),
            retry_message: self.retry_message,
            generated_image: self.generated_image,
            image_prompt: self.image_prompt,
            image_type: self
                .image_type
                .and_then(|t| serde_json::from_value::<ImageKind>(t).ok()),
            audio_url: self.audio_url,
            audio_text: self.audio_text,
            is_image_loading: false,
            is_audio_loading: false,
        })
    }
}

/// A restored session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub history: HistoryLog,
}

/// Parse a raw cache string. Returns `None` when the payload is unusable.
#[must_use]
pub fn parse_snapshot(raw: &str) -> Option<SessionSnapshot> {
    let cached: CachedSession = match serde_json::from_str(raw) {
        Ok(cached) => cached,
        Err(e) => {
            log::warn!("chat cache is malformed, ignoring: {e}");
            return None;
        }
    };

    let messages: Vec<Message> = cached
        .messages?
        .into_iter()
        .filter_map(|value| serde_json::from_value::<CachedMessage>(value).ok())
        .filter_map(CachedMessage::into_message)
        .collect();
    if messages.is_empty() {
        return None;
    }

    let history = cached
        .history
        .unwrap_or_default()
        .into_iter()
        .filter_map(|line| line.as_str().map(str::to_owned))
        .collect();

    Some(SessionSnapshot { messages, history: HistoryLog::from_lines(history) })
}

/// Load the persisted session, or `None` on any miss or failure.
pub fn load(store: &impl KeyValueStore) -> Option<SessionSnapshot> {
    match store.get(CACHE_KEY) {
        Ok(Some(raw)) => parse_snapshot(&raw),
        Ok(None) => None,
        Err(e) => {
            log::error!("failed to load chat cache: {e}");
            None
        }
    }
}

/// Serialize a snapshot, dropping messages whose media is still loading.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_snapshot(messages: &[Message], history: &HistoryLog) -> Result<String, serde_json::Error> {
    let messages = messages.iter().filter(|m| !m.is_loading()).collect();
    serde_json::to_string(&SessionCacheRef { messages, history })
}

/// Write the snapshot. Failures are logged and otherwise ignored.
pub fn save(store: &impl KeyValueStore, messages: &[Message], history: &HistoryLog) {
    let raw = match encode_snapshot(messages, history) {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("failed to encode chat cache: {e}");
            return;
        }
    };
    if let Err(e) = store.set(CACHE_KEY, &raw) {
        log::error!("failed to save chat cache: {e}");
    }
}

/// Erase the snapshot. Failures are logged and otherwise ignored.
pub fn clear(store: &impl KeyValueStore) {
    if let Err(e) = store.remove(CACHE_KEY) {
        log::error!("failed to clear chat cache: {e}");
    }
}
