//! Fetch seam: one `GET`, one JSON body.
//!
//! Client-side (hydrate): `gloo-net` against the page origin.
//! Native: `reqwest` against a configured base URL.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is folded into [`FetchError`] so the controller can render
//! it. Nothing here panics or retries.

#[cfg(feature = "hydrate")]
pub mod browser;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;

#[cfg(feature = "hydrate")]
pub use browser::BrowserFetcher;
#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpFetcher;

use async_trait::async_trait;
use serde_json::Value;

/// Errors surfaced by a panel request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request could not complete. Carries the transport's message verbatim.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The body was not JSON, or not the expected shape.
    #[error("invalid response body: {0}")]
    Format(String),
}

/// Issues a single `GET` and returns the parsed JSON body.
///
/// Futures are `!Send`: panels run on a single-threaded event loop.
#[async_trait(?Send)]
pub trait Fetcher {
    async fn get_json(&self, endpoint: &str) -> Result<Value, FetchError>;
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use futures::channel::oneshot;

    use super::*;

    /// Fetcher answering from a fixed table of endpoint -> result.
    ///
    /// Endpoints with no entry fail with `Network("Failed to fetch")`.
    #[derive(Default)]
    pub struct ScriptedFetcher {
        responses: RefCell<HashMap<String, Result<Value, FetchError>>>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedFetcher {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        #[must_use]
        pub fn respond(self, endpoint: &str, result: Result<Value, FetchError>) -> Self {
            self.responses.borrow_mut().insert(endpoint.to_owned(), result);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl Fetcher for ScriptedFetcher {
        async fn get_json(&self, endpoint: &str) -> Result<Value, FetchError> {
            self.calls.borrow_mut().push(endpoint.to_owned());
            self.responses
                .borrow()
                .get(endpoint)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Network("Failed to fetch".into())))
        }
    }

    /// Fetcher whose single response is released by the test via a channel.
    pub struct GatedFetcher {
        gate: RefCell<Option<oneshot::Receiver<Result<Value, FetchError>>>>,
    }

    impl GatedFetcher {
        #[must_use]
        pub fn new() -> (Self, oneshot::Sender<Result<Value, FetchError>>) {
            let (tx, rx) = oneshot::channel();
            (Self { gate: RefCell::new(Some(rx)) }, tx)
        }
    }

    #[async_trait(?Send)]
    impl Fetcher for GatedFetcher {
        async fn get_json(&self, _endpoint: &str) -> Result<Value, FetchError> {
            let rx = self.gate.borrow_mut().take();
            match rx {
                Some(rx) => rx.await.unwrap_or_else(|_| Err(FetchError::Network("gate dropped".into()))),
                None => Err(FetchError::Network("gate already used".into())),
            }
        }
    }
}
