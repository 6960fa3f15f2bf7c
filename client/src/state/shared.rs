//! Shared session handle for event-driven front-ends.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser callbacks need a `'static`, clonable handle, and several turns may
//! be in flight at once. `SharedSession` keeps the session in an
//! `Rc<RefCell<_>>` and only borrows it for the synchronous `begin_*` and
//! `complete_*` halves; no borrow is held across a backend await.

#[cfg(test)]
#[path = "shared_test.rs"]
mod shared_test;

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::net::api::ChikuBackend;
use crate::util::storage::KeyValueStore;

use super::session::{ChatSession, PendingTurn};

pub struct SharedSession<S: KeyValueStore, B: ChikuBackend> {
    session: Rc<RefCell<ChatSession<S>>>,
    backend: Rc<B>,
}

impl<S: KeyValueStore, B: ChikuBackend> Clone for SharedSession<S, B> {
    fn clone(&self) -> Self {
        Self { session: Rc::clone(&self.session), backend: Rc::clone(&self.backend) }
    }
}

impl<S: KeyValueStore, B: ChikuBackend> SharedSession<S, B> {
    pub fn new(session: ChatSession<S>, backend: B) -> Self {
        Self { session: Rc::new(RefCell::new(session)), backend: Rc::new(backend) }
    }

    /// Read access to the session. Do not hold across an await.
    pub fn session(&self) -> Ref<'_, ChatSession<S>> {
        self.session.borrow()
    }

    /// Send user input. Returns `false` if the input started no turn.
    pub async fn send(&self, text: &str) -> bool {
        let turn = self.session.borrow_mut().begin_send(text);
        match turn {
            Some(turn) => {
                self.run(turn).await;
                true
            }
            None => false,
        }
    }

    /// Retry an errored message. Returns `false` if it was not retryable.
    pub async fn retry(&self, message_id: &str) -> bool {
        let turn = self.session.borrow_mut().retry(message_id);
        match turn {
            Some(turn) => {
                self.run(turn).await;
                true
            }
            None => false,
        }
    }

    pub fn clear(&self) {
        self.session.borrow_mut().clear();
    }

    /// Current message list as a JSON array (camelCase fields).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn messages_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.session.borrow().messages())
    }

    async fn run(&self, turn: PendingTurn) {
        match turn {
            PendingTurn::Chat(pending) => {
                let result = self.backend.chat(&pending.request()).await;
                self.session.borrow_mut().complete_chat(pending, result);
            }
            PendingTurn::Media(pending) => {
                let result = self.backend.command(&pending.request()).await;
                self.session.borrow_mut().complete_media(pending, result);
            }
        }
    }
}
