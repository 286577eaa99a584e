//! Panel endpoints: `GET /api/audit` and `GET /api/lean_check`.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::services::audit::Vulnerability;
use crate::services::lean::LeanCheckResponse;
use crate::state::AppState;

pub const AUDIT_COMPLETED: &str = "Audit completed";

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub status: &'static str,
    pub vulnerabilities: Vec<Vulnerability>,
}

/// `GET /api/audit` runs one simulated audit and return its findings.
pub async fn run_audit(State(state): State<AppState>) -> Json<AuditResponse> {
    tracing::info!("request received for /api/audit");
    let vulnerabilities = state.audit.run(&mut rand::rng());
    Json(AuditResponse { status: AUDIT_COMPLETED, vulnerabilities })
}

/// `GET /api/lean_check` runs the simulated Lean check.
pub async fn run_lean_check(State(state): State<AppState>) -> Json<LeanCheckResponse> {
    tracing::info!("request received for /api/lean_check");
    Json(state.lean.check().await)
}
