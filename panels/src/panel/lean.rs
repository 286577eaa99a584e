//! Lean logic check panel (`GET /api/lean_check`).

use super::{Panel, PanelConfig};
use crate::fetch::FetchError;
use crate::markup::heading_with_message;
use crate::types::LeanStatus;

#[cfg(test)]
#[path = "lean_test.rs"]
mod tests;

pub const LEAN_ENDPOINT: &str = "/api/lean_check";
pub const LEAN_TRIGGER_ID: &str = "lean-button";
pub const LEAN_REGION_ID: &str = "lean-status";

#[derive(Debug, Clone, Copy, Default)]
pub struct LeanPanel;

impl Panel for LeanPanel {
    type Response = LeanStatus;

    fn default_config() -> PanelConfig {
        PanelConfig::new(LEAN_TRIGGER_ID, LEAN_REGION_ID, LEAN_ENDPOINT)
    }

    fn placeholder(&self) -> String {
        "<h3>Verifying Lean logic...</h3>".to_owned()
    }

    fn format_success(&self, data: &LeanStatus) -> String {
        heading_with_message("Lean logic status:", &data.status)
    }

    fn format_error(&self, error: &FetchError) -> String {
        heading_with_message("Error verifying Lean logic:", &error.to_string())
    }
}
