//! Chat state: message list, prompt history, media commands, and the
//! persisted session cache.
//!
//! `session` is the entry point and `shared` wraps it for callback-driven
//! front-ends; the other modules are building blocks and stay free of I/O
//! so they can be tested natively.

pub mod cache;
pub mod command;
pub mod history;
pub mod message;
pub mod session;
pub mod shared;
