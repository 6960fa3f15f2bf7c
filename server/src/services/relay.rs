//! Relay service — validate, truncate, forward, and fall back.
//!
//! DESIGN
//! ======
//! One inbound message produces exactly one upstream call. A reply without
//! a string `answer` is not treated as a failure: the caller gets a fixed fallback
//! string instead. Transport, status and parse failures propagate as
//! [`RelayError::Upstream`].

use crate::upstream::ChikuApi;
use crate::upstream::types::UpstreamError;

use super::truncate::truncate_history;

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;

pub const FALLBACK_ANSWER: &str = "I'm having trouble right now. Please try again! 💫";

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Message is required")]
    MissingMessage,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

// =============================================================================
// RELAY
// =============================================================================

/// Forward `message` to the upstream API, truncated to `budget` characters.
///
/// # Errors
///
/// Returns [`RelayError::MissingMessage`] for an absent or empty message and
/// [`RelayError::Upstream`] when the upstream call fails.
pub async fn relay_message(api: &dyn ChikuApi, message: Option<&str>, budget: usize) -> Result<String, RelayError> {
    let message = message
        .filter(|m| !m.is_empty())
        .ok_or(RelayError::MissingMessage)?;

    let received_len = message.chars().count();
    tracing::info!(length = received_len, "received message");

    let truncated = truncate_history(message, budget);
    if received_len > budget {
        tracing::info!(length = truncated.chars().count(), budget, "truncated message");
    }

    let reply = api.ask(&truncated).await?;
    tracing::debug!("Chiku API response received");

    Ok(reply
        .answer_text()
        .map_or_else(|| FALLBACK_ANSWER.to_string(), str::to_owned))
}
