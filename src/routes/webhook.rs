//! Inbound webhook: `POST /webhook`.
//!
//! ARCHITECTURE
//! ============
//! Callers authenticate with a shared secret in `X-API-Key`. The key is
//! checked before the body is parsed, so unauthenticated callers learn
//! nothing about the expected payload. Keys are compared as SHA-256 digests
//! to keep the comparison length-independent.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::state::AppState;

#[cfg(test)]
#[path = "webhook_test.rs"]
mod tests;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WebhookEvent {
    pub origin: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Serialize)]
pub struct WebhookReceipt {
    pub status: &'static str,
    pub origin: String,
    pub event_id: Uuid,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("webhook disabled: no API key configured")]
    Disabled,
    #[error("missing or invalid X-API-Key")]
    Unauthorized,
    #[error("invalid webhook body: {0}")]
    InvalidBody(String),
}

pub(crate) fn webhook_error_to_status(err: &WebhookError) -> StatusCode {
    match err {
        WebhookError::Disabled => StatusCode::SERVICE_UNAVAILABLE,
        WebhookError::Unauthorized => StatusCode::UNAUTHORIZED,
        WebhookError::InvalidBody(_) => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = webhook_error_to_status(&self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Check a presented key against the configured one.
pub(crate) fn authorize(expected: Option<&str>, presented: Option<&str>) -> Result<(), WebhookError> {
    let expected = expected.ok_or(WebhookError::Disabled)?;
    let presented = presented.ok_or(WebhookError::Unauthorized)?;
    if Sha256::digest(expected.as_bytes()) == Sha256::digest(presented.as_bytes()) {
        Ok(())
    } else {
        Err(WebhookError::Unauthorized)
    }
}

/// `POST /webhook` accepts an authenticated event and acknowledges it.
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookReceipt>, WebhookError> {
    let presented = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if let Err(err) = authorize(state.config.api_key.as_deref(), presented) {
        tracing::warn!(error = %err, "webhook rejected");
        return Err(err);
    }

    let event: WebhookEvent =
        serde_json::from_slice(&body).map_err(|e| WebhookError::InvalidBody(e.to_string()))?;
    let event_id = Uuid::new_v4();
    tracing::info!(%event_id, origin = %event.origin, payload = %event.payload, "webhook event received");

    Ok(Json(WebhookReceipt { status: "received", origin: event.origin, event_id }))
}
