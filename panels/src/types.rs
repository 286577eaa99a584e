//! Wire types returned by the orchestrator endpoints.
//!
//! Fields are opaque display strings. The server attaches extra fields
//! (`id`, `status`) to each vulnerability; they are ignored here. An explicit
//! `null` decodes the same as a missing key.

use serde::{Deserialize, Deserializer, Serialize};

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

/// Body of `GET /api/audit`. A missing or `null` `vulnerabilities` decodes as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub vulnerabilities: Vec<VulnerabilityRecord>,
}

/// One finding reported by the audit endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnerabilityRecord {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub severity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub module: String,
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
}

/// Body of `GET /api/lean_check`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeanStatus {
    pub status: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
