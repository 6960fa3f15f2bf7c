//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the relay logic so route handlers can stay focused on
//! protocol translation (body parsing, status codes, CORS).

pub mod relay;
pub mod truncate;
