//! # panels
//!
//! Remote-triggered status panels for the audit orchestrator page.
//!
//! A panel binds a trigger (a button) to a single `GET` against the
//! orchestrator and renders the outcome into a display region. The crate
//! is split along the two seams that make this testable without a browser:
//! a [`document::Document`] that owns regions and triggers, and a
//! [`fetch::Fetcher`] that performs the request.
//!
//! Browser bindings (DOM document, `gloo-net` fetcher, wasm entry point) are
//! gated behind the `hydrate` feature. Native builds get a `reqwest` fetcher
//! and an in-memory document.

pub mod board;
pub mod controller;
pub mod document;
pub mod fetch;
pub mod markup;
pub mod panel;
pub mod types;

#[cfg(feature = "hydrate")]
pub mod mount;

pub use board::PanelBoard;
pub use controller::{PanelOutcome, StatusPanelController};
pub use document::{Document, MemoryDocument, Subscription};
pub use fetch::{FetchError, Fetcher};
pub use panel::{AuditPanel, LeanPanel, Panel, PanelConfig};
pub use types::{AuditResult, LeanStatus, VulnerabilityRecord};
