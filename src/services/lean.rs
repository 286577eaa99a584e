//! Simulated Lean logic check.
//!
//! Stands in for applying formally verified logic: it waits a configurable
//! latency without blocking the runtime and reports a fixed status.

use std::time::Duration;

use serde::Serialize;

pub const LEAN_STATUS_APPLIED: &str = "Verified Lean logic (simulated) applied";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeanCheckResponse {
    pub status: String,
}

#[derive(Debug, Clone, Copy)]
pub struct LeanChecker {
    delay: Duration,
}

impl LeanChecker {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn check(&self) -> LeanCheckResponse {
        tracing::info!(delay_ms = self.delay.as_millis(), "applying verified Lean logic");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        tracing::info!("Lean logic applied");
        LeanCheckResponse { status: LEAN_STATUS_APPLIED.to_owned() }
    }
}
