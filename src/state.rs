//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Everything in it is immutable after startup, so handlers never lock.

use std::sync::Arc;

use crate::config::Config;
use crate::services::audit::AuditEngine;
use crate::services::lean::LeanChecker;

/// Clone is required by Axum; the config is Arc-wrapped, the rest is Copy.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub audit: AuditEngine,
    pub lean: LeanChecker,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let lean = LeanChecker::new(config.lean_check_delay);
        Self { config: Arc::new(config), audit: AuditEngine, lean }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;

    pub const TEST_API_KEY: &str = "test-api-key";

    /// Config with no Lean delay, a known webhook key, and the repo's `web/` dir.
    #[must_use]
    pub fn test_config() -> Config {
        Config {
            host: "127.0.0.1".into(),
            port: 0,
            api_key: Some(TEST_API_KEY.into()),
            debug_mode: true,
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("web"),
            lean_check_delay: Duration::ZERO,
        }
    }
}
