//! Simulated security audit.
//!
//! DESIGN
//! ======
//! Each run draws zero to three findings from a fixed catalog, orders them
//! by severity, writes a plain-text report to the log, and marks every
//! finding as mitigated. Randomness is injected so tests can seed it.
//!
//! The engine is a stand-in for a real scanner: nothing here inspects code.

use std::fmt::{self, Write};

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use time::OffsetDateTime;

#[cfg(test)]
#[path = "audit_test.rs"]
mod tests;

pub const MAX_FINDINGS: usize = 3;

// =============================================================================
// SEVERITY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
}

impl Severity {
    /// Sort key; higher is more urgent.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 3,
            Self::High => 2,
            Self::Medium => 1,
        }
    }

    /// Draw a severity with weights Critical 4, High 4, Medium 2.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..10u8) {
            0..=3 => Self::Critical,
            4..=7 => Self::High,
            _ => Self::Medium,
        }
    }

    #[must_use]
    pub fn catalog(self) -> &'static [&'static str] {
        match self {
            Self::Critical => &[
                "Remote Code Injection",
                "Critical Credential Exposure",
                "Total Authorization Bypass",
                "Blind SQL Injection",
            ],
            Self::High => &[
                "Sensitive Information Leakage",
                "Logical Denial of Service (DoS)",
                "Cross-Site Scripting (XSS)",
            ],
            Self::Medium => &[
                "User Enumeration",
                "Weak Password Brute Force",
                "Incorrect Security Configuration",
            ],
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
        };
        f.write_str(label)
    }
}

// =============================================================================
// FINDINGS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FindingStatus {
    Identified,
    #[serde(rename = "Mitigated (Simulated)")]
    Mitigated,
}

impl fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identified => f.write_str("Identified"),
            Self::Mitigated => f.write_str("Mitigated (Simulated)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vulnerability {
    pub id: u32,
    pub module: String,
    pub method: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub status: FindingStatus,
}

/// Modules the simulated scanner "inspects", with their methods.
const MODULES: &[(&str, &[&str])] = &[
    ("auth_service.py", &["login", "register", "change_password"]),
    ("data_handler.py", &["get_user_data", "save_record", "delete_file"]),
    ("payment_processor.py", &["process_transaction", "refund", "check_status"]),
];

const FALLBACK_METHOD: &str = "general_method";

fn sample_location<R: Rng>(rng: &mut R) -> (&'static str, &'static str) {
    let Some(&(module, methods)) = MODULES.choose(rng) else {
        return ("unknown_module", FALLBACK_METHOD);
    };
    let method = methods.choose(rng).copied().unwrap_or(FALLBACK_METHOD);
    (module, method)
}

/// Remediation strategy for a finding type.
#[must_use]
pub fn suggest_transformation(kind: &str) -> &'static str {
    match kind {
        "Remote Code Injection" => {
            "Implement sandboxing, strict input validation, and avoid dynamic code execution with external data."
        }
        "Critical Credential Exposure" => {
            "Use managed secrets and secure environment variables. Never hardcode credentials."
        }
        "Total Authorization Bypass" => {
            "Review and strengthen role-based access control. Apply the principle of least privilege."
        }
        "Blind SQL Injection" => "Move to an ORM or use prepared statements with bound parameters.",
        "Sensitive Information Leakage" => {
            "Encrypt data in transit and at rest, anonymize records, and add data loss prevention."
        }
        "Logical Denial of Service (DoS)" => "Optimize algorithms and add rate limiting, timeouts, and load balancing.",
        "Cross-Site Scripting (XSS)" => {
            "Sanitize all user input before rendering it as HTML. Deploy a Content Security Policy."
        }
        "User Enumeration" => "Return generic login and registration errors that do not reveal whether a user exists.",
        "Weak Password Brute Force" => {
            "Limit login attempts, lock accounts temporarily, add a challenge, and enforce strong passwords."
        }
        "Incorrect Security Configuration" => {
            "Audit configuration regularly and start from hardened configuration templates."
        }
        _ => "General strategy: forensic analysis and security patching. Review the architecture.",
    }
}

// =============================================================================
// ENGINE
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct AuditEngine;

impl AuditEngine {
    /// Draw raw findings, unordered, all `Identified`.
    pub fn identify<R: Rng>(&self, rng: &mut R) -> Vec<Vulnerability> {
        let count = rng.random_range(0..=MAX_FINDINGS);
        (1..=count)
            .map(|id| {
                let severity = Severity::sample(rng);
                let kind = severity.catalog().choose(rng).copied().unwrap_or("Unclassified");
                let (module, method) = sample_location(rng);
                let vuln = Vulnerability {
                    id: u32::try_from(id).unwrap_or(u32::MAX),
                    module: module.to_owned(),
                    method: method.to_owned(),
                    kind: kind.to_owned(),
                    severity,
                    status: FindingStatus::Identified,
                };
                tracing::warn!(
                    kind = %vuln.kind,
                    severity = %vuln.severity,
                    location = %format!("{}::{}", vuln.module, vuln.method),
                    "vulnerability found"
                );
                vuln
            })
            .collect()
    }

    /// Full audit: identify, prioritize, report, transform.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Vec<Vulnerability> {
        tracing::info!("security audit started");
        let mut findings = self.identify(rng);
        if findings.is_empty() {
            tracing::info!("no new critical vulnerabilities detected in this audit");
            return findings;
        }

        prioritize(&mut findings);
        for (priority, vuln) in findings.iter().enumerate() {
            tracing::info!(
                priority = priority + 1,
                kind = %vuln.kind,
                severity = %vuln.severity,
                "prioritized finding"
            );
        }

        let report = render_report(&findings, OffsetDateTime::now_utc());
        tracing::info!("{report}");

        for vuln in &mut findings {
            vuln.status = FindingStatus::Mitigated;
        }
        tracing::info!(count = findings.len(), "transformation and closure completed");
        findings
    }
}

/// Most severe first; equal severities keep discovery order.
pub fn prioritize(findings: &mut [Vulnerability]) {
    findings.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank()));
}

/// Plain-text report logged at the end of an audit.
pub fn render_report(findings: &[Vulnerability], at: OffsetDateTime) -> String {
    let mut report = format!("\n--- Security Audit Report ({at}) ---\n");
    report.push_str("Identified and prioritized vulnerabilities:\n\n");
    for vuln in findings {
        let _ = writeln!(report, "  - ID: {}", vuln.id);
        let _ = writeln!(report, "    Module: {} Method: {}", vuln.module, vuln.method);
        let _ = writeln!(report, "    Type: {}", vuln.kind);
        let _ = writeln!(report, "    Severity: {}", vuln.severity);
        let _ = writeln!(report, "    Status: {}", vuln.status);
        let _ = writeln!(report, "    Transformation Suggestion: {}\n", suggest_transformation(&vuln.kind));
    }
    report.push_str("--- End of Audit ---\n");
    report
}
