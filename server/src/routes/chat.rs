//! Chat relay route — `POST /api/chiku-chat`.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::services::relay::{self, RelayError};
use crate::state::AppState;

/// Inbound body. `message` stays raw JSON: a non-string value is a missing
/// message, not a malformed body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ChatRequest {
    /// The message, if it is a JSON string.
    #[must_use]
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().and_then(serde_json::Value::as_str)
    }
}

#[derive(Debug, Serialize)]
pub struct ChatAnswer {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub(crate) fn relay_error_to_status(err: &RelayError) -> StatusCode {
    match err {
        RelayError::MissingMessage | RelayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        RelayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = relay_error_to_status(&self);
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// Parse the raw body by hand so malformed JSON still gets a JSON error body.
fn parse_request(body: &[u8]) -> Result<ChatRequest, RelayError> {
    serde_json::from_slice(body).map_err(|e| RelayError::InvalidBody(e.to_string()))
}

/// `POST /api/chiku-chat` — truncate the serialized history and forward it.
pub async fn chiku_chat(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatAnswer>, RelayError> {
    let request = parse_request(&body)?;
    let answer = relay::relay_message(state.upstream.as_ref(), request.message_text(), state.history_budget)
        .await
        .inspect_err(|e| match e {
            RelayError::Upstream(_) => tracing::error!(error = %e, "chiku-chat relay failed"),
            _ => tracing::warn!(error = %e, "chiku-chat request rejected"),
        })?;
    Ok(Json(ChatAnswer { answer }))
}

/// `OPTIONS /api/chiku-chat` — empty success; CORS headers come from the layer.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
