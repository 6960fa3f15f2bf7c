//! Upstream — HTTP adapter for the Chiku conversational API.
//!
//! DESIGN
//! ======
//! The upstream takes the whole prompt as a single `user_message` query
//! parameter on a GET request and answers with `{ "answer": "..." }`.
//! Every call is bounded by the configured request and connect timeouts;
//! there is no retry here, the client owns retries.

pub mod types;

use std::time::Duration;

use crate::config::{RelayConfig, UpstreamTimeouts};
pub use types::ChikuApi;
use types::{UpstreamError, UpstreamReply};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

const MESSAGE_QUERY_PARAM: &str = "user_message";

/// reqwest-backed [`ChikuApi`] implementation.
pub struct HttpUpstream {
    http: reqwest::Client,
    url: String,
}

impl HttpUpstream {
    /// Build an upstream client for `url` with bounded timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client fails to build.
    pub fn new(url: impl Into<String>, timeouts: UpstreamTimeouts) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| UpstreamError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: url.into() })
    }

    /// Build an upstream client from a parsed relay config.
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client fails to build.
    pub fn from_config(config: &RelayConfig) -> Result<Self, UpstreamError> {
        Self::new(config.upstream_url.clone(), config.timeouts)
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl ChikuApi for HttpUpstream {
    async fn ask(&self, message: &str) -> Result<UpstreamReply, UpstreamError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[(MESSAGE_QUERY_PARAM, message)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), reason = ?status.canonical_reason(), "Chiku API error");
            return Err(UpstreamError::Status { status: status.as_u16() });
        }

        let text = response
            .text()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| UpstreamError::Parse(e.to_string()))
    }
}
