//! Panel definitions: what to fetch and how to render it.

pub mod audit;
pub mod lean;

pub use audit::AuditPanel;
pub use lean::LeanPanel;

use serde::de::DeserializeOwned;

use crate::fetch::FetchError;

/// Identifiers for one panel instance. Passed explicitly; nothing is looked
/// up from ambient state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelConfig {
    pub trigger_id: String,
    pub region_id: String,
    pub endpoint: String,
}

impl PanelConfig {
    pub fn new(trigger_id: impl Into<String>, region_id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self { trigger_id: trigger_id.into(), region_id: region_id.into(), endpoint: endpoint.into() }
    }
}

/// Renderer for one kind of panel. Formatters are pure.
pub trait Panel: 'static {
    type Response: DeserializeOwned + 'static;

    /// Identifiers used by the orchestrator page.
    fn default_config() -> PanelConfig
    where
        Self: Sized;

    fn placeholder(&self) -> String;

    fn format_success(&self, data: &Self::Response) -> String;

    fn format_error(&self, error: &FetchError) -> String;
}
