//! # chiku-client
//!
//! Chat session core for the Chiku AI widget: message state, prompt history,
//! slash-command dispatch, local cache recovery, and the backend seam used to
//! reach the relay and the media command endpoint.
//!
//! The session logic is storage- and transport-agnostic. Browser bindings
//! (`localStorage`, `gloo-net`, console logging, and the `ChikuChat` wasm
//! export in `app`) live behind the `hydrate` feature; native front-ends
//! supply their own [`util::storage::KeyValueStore`] and
//! [`net::api::ChikuBackend`].

pub mod net;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
pub mod app;

/// Install the browser console logger and panic hook.
#[cfg(feature = "hydrate")]
pub fn init_browser_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}
