//! Security audit panel (`GET /api/audit`).

use std::fmt::Write;

use super::{Panel, PanelConfig};
use crate::fetch::FetchError;
use crate::markup::{escape, heading_with_message};
use crate::types::{AuditResult, VulnerabilityRecord};

#[cfg(test)]
#[path = "audit_test.rs"]
mod tests;

pub const AUDIT_ENDPOINT: &str = "/api/audit";
pub const AUDIT_TRIGGER_ID: &str = "audit-button";
pub const AUDIT_REGION_ID: &str = "audit-result";

pub const NO_FINDINGS_MESSAGE: &str = "No critical vulnerabilities detected in this round.";

#[derive(Debug, Clone, Copy, Default)]
pub struct AuditPanel;

/// `type (severity) in module::method`, escaped.
pub fn describe_vulnerability(vuln: &VulnerabilityRecord) -> String {
    format!(
        "{} ({}) in {}::{}",
        escape(&vuln.kind),
        escape(&vuln.severity),
        escape(&vuln.module),
        escape(&vuln.method)
    )
}

impl Panel for AuditPanel {
    type Response = AuditResult;

    fn default_config() -> PanelConfig {
        PanelConfig::new(AUDIT_TRIGGER_ID, AUDIT_REGION_ID, AUDIT_ENDPOINT)
    }

    fn placeholder(&self) -> String {
        "<h3>Starting audit...</h3><p>This may take a few seconds...</p>".to_owned()
    }

    fn format_success(&self, data: &AuditResult) -> String {
        let mut html = String::from("<h3>Audit result:</h3>");
        if data.vulnerabilities.is_empty() {
            let _ = write!(html, "<p>{NO_FINDINGS_MESSAGE}</p>");
            return html;
        }

        html.push_str("<p>Vulnerabilities detected and transformed!</p><ul>");
        for vuln in &data.vulnerabilities {
            let _ = write!(html, "<li>{}</li>", describe_vulnerability(vuln));
        }
        html.push_str("</ul><p>Full details are available in the server logs.</p>");
        html
    }

    fn format_error(&self, error: &FetchError) -> String {
        heading_with_message("Error running the audit:", &error.to_string())
    }
}
