//! Chat session — message list, prompt history, dispatch, and recovery.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session owns everything the chat panel renders. It talks to the relay
//! (plain chat) and the media endpoint (slash commands) through a
//! [`ChikuBackend`], and snapshots itself to a [`KeyValueStore`] after every
//! change.
//!
//! DESIGN
//! ======
//! Every turn is split in two:
//!
//! - `begin_*` mutates state synchronously (user bubble, placeholder, loading
//!   counter) and returns a pending handle carrying the request;
//! - `complete_*` applies the backend result to the message the handle
//!   points at.
//!
//! The browser can therefore run several requests at once and let them finish
//! in any order; each result lands on its own placeholder, never on "the last
//! message". [`ChatSession::send_text`] chains both halves for callers that
//! are happy to await each turn.
//!
//! HISTORY INVARIANT
//! =================
//! The prompt for a chat turn is `history + "User: <text>"`, but the user line
//! is only committed together with its reply. A failed turn leaves the
//! history untouched, so a retry resends exactly the context the failed
//! attempt sent. Media commands never touch the history.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::api::ChikuBackend;
use crate::net::types::{ApiError, ChatReply, ChatRequest, CommandRequest, CommandResponse};
use crate::util::storage::KeyValueStore;

use super::cache;
use super::command::{MediaCommand, MediaSlot};
use super::history::HistoryLog;
use super::message::{ImageKind, Message, default_messages};

pub const CHAT_ERROR_TEXT: &str = "Oops! Something went wrong. Please try again! 🌸";

// =============================================================================
// PENDING TURNS
// =============================================================================

/// A plain chat turn awaiting the relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingChat {
    text: String,
    prompt: String,
    generation: u64,
}

impl PendingChat {
    /// The user's text for this turn.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The serialized history sent to the relay.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn request(&self) -> ChatRequest {
        ChatRequest { message: self.prompt.clone() }
    }
}

/// A media command awaiting the media endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingMedia {
    placeholder_id: String,
    command: MediaCommand,
    generation: u64,
}

impl PendingMedia {
    /// Id of the loading placeholder this result will fill.
    #[must_use]
    pub fn placeholder_id(&self) -> &str {
        &self.placeholder_id
    }

    #[must_use]
    pub fn command(&self) -> &MediaCommand {
        &self.command
    }

    #[must_use]
    pub fn request(&self) -> CommandRequest {
        self.command.request()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingTurn {
    Chat(PendingChat),
    Media(PendingMedia),
}

// =============================================================================
// SESSION
// =============================================================================

pub struct ChatSession<S: KeyValueStore> {
    store: S,
    messages: Vec<Message>,
    history: HistoryLog,
    /// Plain chat turns in flight. Media commands track loading per message.
    pending_chats: usize,
    /// Bumped by `clear`; results of turns begun earlier are dropped.
    generation: u64,
    last_user_message: String,
}

impl<S: KeyValueStore> ChatSession<S> {
    /// Restore the session from `store`, or start fresh with the greeting.
    ///
    /// Never fails: unreadable or malformed caches are logged and treated as
    /// a miss. Nothing is written until the first state change.
    pub fn initialize(store: S) -> Self {
        let (messages, history) = match cache::load(&store) {
            Some(snapshot) => {
                log::debug!(
                    "restored chat cache: {} messages, {} history lines",
                    snapshot.messages.len(),
                    snapshot.history.len()
                );
                (snapshot.messages, snapshot.history)
            }
            None => (default_messages(), HistoryLog::new()),
        };

        Self { store, messages, history, pending_chats: 0, generation: 0, last_user_message: String::new() }
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// True while any plain chat turn is in flight. Used to gate the input.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending_chats > 0
    }

    /// The last text or command the user issued, for input recall.
    #[must_use]
    pub fn last_user_message(&self) -> &str {
        &self.last_user_message
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Id of the newest message that offers a retry.
    #[must_use]
    pub fn latest_retryable(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_retryable())
            .map(|m| m.id.as_str())
    }

    // -------------------------------------------------------------------------
    // begin
    // -------------------------------------------------------------------------

    /// Start a turn for user input. Slash commands go to the media flow,
    /// everything else to the relay. Whitespace-only input is ignored.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingTurn> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.dispatch(text, false))
    }

    /// Retry the errored message `message_id`.
    ///
    /// Removes every errored message, then resends its `retry_message`. A
    /// plain chat retry reuses the existing user bubble. Returns `None` if the
    /// message is unknown or not retryable.
    pub fn retry(&mut self, message_id: &str) -> Option<PendingTurn> {
        let retry_text = self
            .messages
            .iter()
            .find(|m| m.id == message_id && m.is_retryable())?
            .retry_message
            .clone()?;

        self.messages.retain(|m| !m.is_error);
        Some(self.dispatch(&retry_text, true))
    }

    fn dispatch(&mut self, text: &str, is_retry: bool) -> PendingTurn {
        match MediaCommand::parse(text) {
            Some(command) => PendingTurn::Media(self.begin_media(command)),
            None => PendingTurn::Chat(self.begin_chat(text, is_retry)),
        }
    }

    fn begin_chat(&mut self, text: &str, is_retry: bool) -> PendingChat {
        if !is_retry {
            self.messages.push(Message::user(text));
            text.clone_into(&mut self.last_user_message);
        }

        self.pending_chats += 1;
        let pending = PendingChat { text: text.to_owned(), prompt: self.history.prompt_with(text), generation: self.generation };
        self.persist();
        pending
    }

    /// Start a media command: user bubble plus a loading placeholder.
    pub fn begin_media(&mut self, command: MediaCommand) -> PendingMedia {
        let display = command.display();
        self.messages.push(Message::user(display.clone()));

        let mut placeholder = Message::assistant(command.loading_text());
        match command.slot() {
            MediaSlot::Image => placeholder.is_image_loading = true,
            MediaSlot::Audio => placeholder.is_audio_loading = true,
        }
        placeholder.retry_message = Some(display.clone());
        let placeholder_id = placeholder.id.clone();
        self.messages.push(placeholder);
        self.last_user_message = display;

        self.persist();
        PendingMedia { placeholder_id, command, generation: self.generation }
    }

    // -------------------------------------------------------------------------
    // complete
    // -------------------------------------------------------------------------

    /// Apply the relay result for `pending`.
    ///
    /// A reply counts as success only if it carries a non-empty `answer`.
    /// Success commits the user line and the reply to the history; failure
    /// appends a retryable error bubble and leaves the history alone.
    pub fn complete_chat(&mut self, pending: PendingChat, result: Result<ChatReply, ApiError>) {
        if pending.generation != self.generation {
            log::debug!("dropping chat reply from a cleared session");
            return;
        }
        self.pending_chats = self.pending_chats.saturating_sub(1);

        let answer = match result {
            Ok(reply) => match reply.answer_text() {
                Some(answer) => Some(answer.to_owned()),
                None => {
                    log::warn!("relay reply carried no answer: {:?}", reply.error);
                    None
                }
            },
            Err(e) => {
                log::error!("failed to get response: {e}");
                None
            }
        };

        match answer {
            Some(answer) => {
                self.history.push_turn(&pending.text, &answer);
                self.messages.push(Message::assistant(answer));
            }
            None => self.messages.push(Message::error(CHAT_ERROR_TEXT, pending.text)),
        }
        self.persist();
    }

    /// Apply the media endpoint result to the placeholder of `pending`.
    ///
    /// Media has no sensible fallback, so a response without an image (or
    /// audio for TTS) flips the placeholder to an error state.
    pub fn complete_media(&mut self, pending: PendingMedia, result: Result<CommandResponse, ApiError>) {
        if pending.generation != self.generation {
            log::debug!("dropping media result from a cleared session");
            return;
        }
        let Some(message) = self.messages.iter_mut().find(|m| m.id == pending.placeholder_id) else {
            log::debug!("media placeholder {} no longer exists", pending.placeholder_id);
            return;
        };

        let command = &pending.command;
        let media = match &result {
            Ok(resp) => match command.slot() {
                MediaSlot::Image => resp.first_image(),
                MediaSlot::Audio => resp.audio(),
            },
            Err(_) => None,
        };

        message.is_image_loading = false;
        message.is_audio_loading = false;

        match media {
            Some(url) => {
                message.content = command.success_text().to_owned();
                match command {
                    MediaCommand::ImageGen { prompt } => {
                        message.generated_image = Some(url.to_owned());
                        message.image_prompt = Some(prompt.clone());
                        message.image_type = Some(ImageKind::Generated);
                    }
                    MediaCommand::Reaction(reaction) => {
                        message.generated_image = Some(url.to_owned());
                        message.image_prompt = Some(reaction.name().to_owned());
                        message.image_type = Some(reaction.image_kind());
                    }
                    MediaCommand::Tts { text } => {
                        message.audio_url = Some(url.to_owned());
                        message.audio_text = Some(text.clone());
                    }
                }
            }
            None => {
                match &result {
                    Err(e) => log::error!("media command {} failed: {e}", command.display()),
                    Ok(_) => log::error!("media command {} returned no media", command.display()),
                }
                message.content = command.failure_text();
                message.is_error = true;
            }
        }
        self.persist();
    }

    // -------------------------------------------------------------------------
    // drive
    // -------------------------------------------------------------------------

    /// Run a pending turn against `backend` and apply the result.
    pub async fn execute<B>(&mut self, backend: &B, turn: PendingTurn)
    where
        B: ChikuBackend + ?Sized,
    {
        match turn {
            PendingTurn::Chat(pending) => {
                let result = backend.chat(&pending.request()).await;
                self.complete_chat(pending, result);
            }
            PendingTurn::Media(pending) => {
                let result = backend.command(&pending.request()).await;
                self.complete_media(pending, result);
            }
        }
    }

    /// Send user input and wait for its result.
    pub async fn send_text<B>(&mut self, backend: &B, text: &str)
    where
        B: ChikuBackend + ?Sized,
    {
        if let Some(turn) = self.begin_send(text) {
            self.execute(backend, turn).await;
        }
    }

    /// Retry `message_id` and wait for its result. Returns `false` if the
    /// message was not retryable.
    pub async fn retry_message<B>(&mut self, backend: &B, message_id: &str) -> bool
    where
        B: ChikuBackend + ?Sized,
    {
        match self.retry(message_id) {
            Some(turn) => {
                self.execute(backend, turn).await;
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // persistence
    // -------------------------------------------------------------------------

    /// Reset to the greeting, empty the history, and erase the cache.
    pub fn clear(&mut self) {
        cache::clear(&self.store);
        self.messages = default_messages();
        self.history.clear();
        self.last_user_message.clear();
        self.pending_chats = 0;
        self.generation += 1;
    }

    /// Snapshot messages and history to the store, skipping loading bubbles.
    pub fn persist(&self) {
        cache::save(&self.store, &self.messages, &self.history);
    }
}
