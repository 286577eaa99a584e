use super::*;

#[test]
fn default_config_uses_page_identifiers() {
    let config = LeanPanel::default_config();
    assert_eq!(config, PanelConfig::new("lean-button", "lean-status", "/api/lean_check"));
}

#[test]
fn status_is_rendered_verbatim() {
    let html = LeanPanel.format_success(&LeanStatus { status: "OK".into() });
    assert_eq!(html, "<h3>Lean logic status:</h3><p>OK</p>");
}

#[test]
fn status_markup_is_escaped() {
    let html = LeanPanel.format_success(&LeanStatus { status: "<img>".into() });
    assert!(html.contains("&lt;img&gt;"));
}

#[test]
fn status_error_renders_code() {
    let html = LeanPanel.format_error(&FetchError::Status(503));
    assert!(html.contains("Error verifying Lean logic"));
    assert!(html.contains("503"));
}
