//! Browser fetcher backed by `gloo-net`.
//!
//! Endpoints are passed to `fetch` as-is, so relative paths resolve against
//! the page origin.

use async_trait::async_trait;
use serde_json::Value;

use super::{FetchError, Fetcher};

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserFetcher;

#[async_trait(?Send)]
impl Fetcher for BrowserFetcher {
    async fn get_json(&self, endpoint: &str) -> Result<Value, FetchError> {
        let resp = gloo_net::http::Request::get(endpoint)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(FetchError::Status(resp.status()));
        }
        resp.json::<Value>()
            .await
            .map_err(|e| FetchError::Format(e.to_string()))
    }
}
