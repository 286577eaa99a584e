use super::*;

#[test]
fn authorize_accepts_matching_key() {
    assert_eq!(authorize(Some("secret"), Some("secret")), Ok(()));
}

#[test]
fn authorize_rejects_wrong_key() {
    assert_eq!(authorize(Some("secret"), Some("secreT")), Err(WebhookError::Unauthorized));
    assert_eq!(authorize(Some("secret"), Some("")), Err(WebhookError::Unauthorized));
}

#[test]
fn authorize_rejects_missing_key() {
    assert_eq!(authorize(Some("secret"), None), Err(WebhookError::Unauthorized));
}

#[test]
fn authorize_disabled_without_configured_key() {
    assert_eq!(authorize(None, Some("anything")), Err(WebhookError::Disabled));
    assert_eq!(authorize(None, None), Err(WebhookError::Disabled));
}

#[test]
fn webhook_error_to_status_maps_variants() {
    assert_eq!(webhook_error_to_status(&WebhookError::Disabled), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(webhook_error_to_status(&WebhookError::Unauthorized), StatusCode::UNAUTHORIZED);
    assert_eq!(webhook_error_to_status(&WebhookError::InvalidBody("x".into())), StatusCode::BAD_REQUEST);
}

#[test]
fn webhook_event_payload_defaults_to_null() {
    let event: WebhookEvent = serde_json::from_str(r#"{"origin":"script"}"#).unwrap();
    assert_eq!(event.origin, "script");
    assert!(event.payload.is_null());
}
