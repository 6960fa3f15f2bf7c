//! Browser entry point for the chat widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page's script constructs one `ChikuChat`, forwards input and retry
//! clicks to it, and re-renders from `messages()` whenever a returned
//! promise settles. The session persists to `localStorage` and talks to the
//! relay and media endpoints through `gloo-net`.

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::net::api::GlooBackend;
use crate::state::session::ChatSession;
use crate::state::shared::SharedSession;
use crate::util::storage::LocalStorage;

/// Install logging once when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    crate::init_browser_logging();
    log::info!("chiku chat widget loaded");
}

#[wasm_bindgen]
pub struct ChikuChat {
    inner: SharedSession<LocalStorage, GlooBackend>,
}

#[wasm_bindgen]
impl ChikuChat {
    /// Restore the cached session and bind it to the given endpoints.
    #[wasm_bindgen(constructor)]
    pub fn new(chat_url: String, commands_url: Option<String>) -> ChikuChat {
        let session = ChatSession::initialize(LocalStorage);
        Self { inner: SharedSession::new(session, GlooBackend::new(chat_url, commands_url)) }
    }

    /// Send user input. Resolves to `false` if nothing was sent.
    pub fn send(&self, text: String) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move { Ok(JsValue::from_bool(inner.send(&text).await)) })
    }

    /// Retry an errored message. Resolves to `false` if it was not retryable.
    pub fn retry(&self, message_id: String) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move { Ok(JsValue::from_bool(inner.retry(&message_id).await)) })
    }

    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Messages as a JSON array string.
    ///
    /// # Errors
    ///
    /// Returns a JS error if serialization fails.
    pub fn messages(&self) -> Result<String, JsValue> {
        self.inner
            .messages_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.inner.session().is_loading()
    }

    #[wasm_bindgen(js_name = lastUserMessage)]
    pub fn last_user_message(&self) -> String {
        self.inner.session().last_user_message().to_owned()
    }
}
