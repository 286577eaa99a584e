use std::cell::RefCell;
use std::future::Future;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::document::MemoryDocument;
use crate::fetch::test_helpers::{GatedFetcher, ScriptedFetcher};
use crate::panel::{AuditPanel, LeanPanel};
use crate::types::LeanStatus;

// =============================================================================
// log capture
// =============================================================================

thread_local! {
    static CAPTURED: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Records events emitted on the current thread; tests run on separate threads.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED.with(|captured| captured.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

fn capture_logs() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Trace);
    CAPTURED.with(|captured| captured.borrow_mut().clear());
}

fn captured_errors() -> Vec<String> {
    CAPTURED.with(|captured| {
        captured
            .borrow()
            .iter()
            .filter(|(level, _)| *level == log::Level::Error)
            .map(|(_, message)| message.clone())
            .collect()
    })
}

fn audit_doc() -> Rc<MemoryDocument> {
    Rc::new(MemoryDocument::new().with_region("audit-result"))
}

fn lean_doc() -> Rc<MemoryDocument> {
    Rc::new(MemoryDocument::new().with_region("lean-status"))
}

// =============================================================================
// run_triggered_fetch
// =============================================================================

#[test]
fn placeholder_is_written_before_future_is_polled() {
    let doc = lean_doc();
    let fetcher = Rc::new(ScriptedFetcher::new().respond("/x", Ok(json!({"status": "OK"}))));
    let controller = StatusPanelController::new(doc.clone(), fetcher.clone());

    let pending = controller
        .run_triggered_fetch("/x", "lean-status", "loading", |d: &LeanStatus| d.status.clone(), |e| e.to_string())
        .unwrap();

    assert_eq!(doc.content("lean-status").as_deref(), Some("loading"));
    assert!(fetcher.calls().is_empty());

    assert_eq!(block_on(pending), PanelOutcome::Rendered);
    assert_eq!(doc.history("lean-status"), vec!["loading", "OK"]);
    assert_eq!(fetcher.calls(), vec!["/x"]);
}

#[test]
fn missing_region_is_silent_noop() {
    let doc = Rc::new(MemoryDocument::new());
    let fetcher = Rc::new(ScriptedFetcher::new());
    let controller = StatusPanelController::new(doc.clone(), fetcher.clone());

    let pending = controller.run_triggered_fetch(
        "/api/audit",
        "audit-result",
        "loading",
        |_: &serde_json::Value| "ok".to_owned(),
        |e| e.to_string(),
    );

    assert!(pending.is_none());
    assert!(doc.history("audit-result").is_empty());
    assert!(fetcher.calls().is_empty());
}

#[test]
fn shape_mismatch_is_format_error() {
    let doc = lean_doc();
    let fetcher = Rc::new(ScriptedFetcher::new().respond("/api/lean_check", Ok(json!({"state": "OK"}))));
    let controller = StatusPanelController::new(doc.clone(), fetcher);

    let outcome = block_on(controller.run_panel(&LeanPanel::default_config(), &Rc::new(LeanPanel)).unwrap());

    assert!(matches!(outcome, PanelOutcome::Failed(FetchError::Format(_))));
    let content = doc.content("lean-status").unwrap();
    assert!(content.contains("Error verifying Lean logic"));
}

#[test]
fn placeholder_stays_while_request_is_outstanding() {
    let doc = lean_doc();
    let (fetcher, release) = GatedFetcher::new();
    let controller = StatusPanelController::new(doc.clone(), Rc::new(fetcher));
    let placeholder = LeanPanel.placeholder();

    let mut pending = controller.run_panel(&LeanPanel::default_config(), &Rc::new(LeanPanel)).unwrap();
    let waker = futures::task::noop_waker();
    let mut cx = std::task::Context::from_waker(&waker);
    assert!(pending.as_mut().poll(&mut cx).is_pending());
    assert_eq!(doc.content("lean-status"), Some(placeholder.clone()));

    release.send(Ok(json!({"status": "done"}))).unwrap();
    assert_eq!(block_on(pending), PanelOutcome::Rendered);
    assert_ne!(doc.content("lean-status"), Some(placeholder));
}

#[test]
fn failure_logs_exactly_one_error() {
    capture_logs();
    let doc = lean_doc();
    let fetcher = Rc::new(ScriptedFetcher::new().respond("/api/lean_check", Err(FetchError::Status(502))));
    let controller = StatusPanelController::new(doc, fetcher);

    block_on(controller.run_panel(&LeanPanel::default_config(), &Rc::new(LeanPanel)).unwrap());

    let errors = captured_errors();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].contains("/api/lean_check"));
    assert!(errors[0].contains("502"));
}

#[test]
fn success_logs_no_error() {
    capture_logs();
    let doc = lean_doc();
    let fetcher = Rc::new(ScriptedFetcher::new().respond("/api/lean_check", Ok(json!({"status": "OK"}))));
    let controller = StatusPanelController::new(doc, fetcher);

    let outcome = block_on(controller.run_panel(&LeanPanel::default_config(), &Rc::new(LeanPanel)).unwrap());

    assert_eq!(outcome, PanelOutcome::Rendered);
    assert!(captured_errors().is_empty());
}

// =============================================================================
// concrete panels
// =============================================================================

#[test]
fn audit_empty_result_renders_no_findings() {
    let doc = audit_doc();
    let fetcher = Rc::new(ScriptedFetcher::new().respond("/api/audit", Ok(json!({"vulnerabilities": []}))));
    let controller = StatusPanelController::new(doc.clone(), fetcher);

    let outcome = block_on(controller.run_panel(&AuditPanel::default_config(), &Rc::new(AuditPanel)).unwrap());

    assert_eq!(outcome, PanelOutcome::Rendered);
    let content = doc.content("audit-result").unwrap();
    assert!(content.contains("No critical vulnerabilities"));
    assert!(!content.contains("<ul>"));
    assert_eq!(doc.history("audit-result").len(), 2);
}

#[test]
fn audit_null_vulnerabilities_renders_no_findings() {
    let doc = audit_doc();
    let fetcher = Rc::new(ScriptedFetcher::new().respond("/api/audit", Ok(json!({"vulnerabilities": null}))));
    let controller = StatusPanelController::new(doc.clone(), fetcher);

    let outcome = block_on(controller.run_panel(&AuditPanel::default_config(), &Rc::new(AuditPanel)).unwrap());

    assert_eq!(outcome, PanelOutcome::Rendered);
    let content = doc.content("audit-result").unwrap();
    assert!(content.contains(crate::panel::audit::NO_FINDINGS_MESSAGE));
    assert!(!content.contains("Error running the audit"));
}

#[test]
fn audit_single_finding_renders_item() {
    let doc = audit_doc();
    let body = json!({"vulnerabilities": [{"type": "XSS", "severity": "high", "module": "auth", "method": "login"}]});
    let fetcher = Rc::new(ScriptedFetcher::new().respond("/api/audit", Ok(body)));
    let controller = StatusPanelController::new(doc.clone(), fetcher);

    block_on(controller.run_panel(&AuditPanel::default_config(), &Rc::new(AuditPanel)).unwrap());

    let content = doc.content("audit-result").unwrap();
    assert!(content.contains("<li>XSS (high) in auth::login</li>"));
}

#[test]
fn audit_network_failure_renders_message() {
    let doc = audit_doc();
    let fetcher = Rc::new(ScriptedFetcher::new());
    let controller = StatusPanelController::new(doc.clone(), fetcher);

    let outcome = block_on(controller.run_panel(&AuditPanel::default_config(), &Rc::new(AuditPanel)).unwrap());

    assert_eq!(outcome, PanelOutcome::Failed(FetchError::Network("Failed to fetch".into())));
    let content = doc.content("audit-result").unwrap();
    assert!(content.contains("Failed to fetch"));
    assert_ne!(content, AuditPanel.placeholder());
}

#[test]
fn lean_ok_status_replaces_placeholder() {
    let doc = lean_doc();
    let fetcher = Rc::new(ScriptedFetcher::new().respond("/api/lean_check", Ok(json!({"status": "OK"}))));
    let controller = StatusPanelController::new(doc.clone(), fetcher);

    block_on(controller.run_panel(&LeanPanel::default_config(), &Rc::new(LeanPanel)).unwrap());

    let content = doc.content("lean-status").unwrap();
    assert!(content.contains("OK"));
    assert_ne!(content, LeanPanel.placeholder());
}

#[test]
fn status_error_is_rendered_as_failure() {
    let doc = audit_doc();
    let fetcher = Rc::new(ScriptedFetcher::new().respond("/api/audit", Err(FetchError::Status(500))));
    let controller = StatusPanelController::new(doc.clone(), fetcher);

    let outcome = block_on(controller.run_panel(&AuditPanel::default_config(), &Rc::new(AuditPanel)).unwrap());

    assert_eq!(outcome, PanelOutcome::Failed(FetchError::Status(500)));
    assert!(doc.content("audit-result").unwrap().contains("500"));
}
