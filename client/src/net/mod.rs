//! Networking modules for the relay and media command endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the backend seam the session calls through, and `types`
//! defines the shared wire schema.

pub mod api;
pub mod types;
