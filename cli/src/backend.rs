//! `reqwest` implementation of the chat backend.

use std::time::Duration;

use chiku_client::net::api::{ChikuBackend, status_error};
use chiku_client::net::types::{ApiError, ChatReply, ChatRequest, CommandRequest, CommandResponse};

#[derive(Clone, Debug)]
pub struct HttpBackend {
    http: reqwest::Client,
    relay_url: String,
    commands_url: Option<String>,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(relay_url: String, commands_url: Option<String>, timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { http, relay_url, commands_url })
    }

    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text));
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl ChikuBackend for HttpBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.post_json(&self.relay_url, request).await
    }

    async fn command(&self, request: &CommandRequest) -> Result<CommandResponse, ApiError> {
        let url = self
            .commands_url
            .as_deref()
            .ok_or(ApiError::Unavailable("media commands"))?;
        self.post_json(url, request).await
    }
}
