//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, wall clock)
//! from session logic so the session can be tested natively.

pub mod clock;
pub mod storage;
