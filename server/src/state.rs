//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! relay keeps no per-request or cross-request data: the state is just the
//! upstream client and the history budget.

use std::sync::Arc;

use crate::upstream::ChikuApi;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the upstream client is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn ChikuApi>,
    pub history_budget: usize,
}

impl AppState {
    #[must_use]
    pub fn new(upstream: Arc<dyn ChikuApi>, history_budget: usize) -> Self {
        Self { upstream, history_budget }
    }
}
