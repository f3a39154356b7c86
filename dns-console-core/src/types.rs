//! Request payloads accepted by the record service.

use serde::Deserialize;

/// TTL applied when a request omits one.
pub const DEFAULT_TTL: u32 = 3600;

const fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// Body of a record creation request.
///
/// `record_type` stays a raw string here so the validation engine can reject
/// unsupported types in its documented rule order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecordRequest {
    /// Relative record name; `"@"` for the zone apex.
    #[serde(default)]
    pub name: String,
    /// Record type, e.g. `"A"` or `"MX"`.
    #[serde(rename = "type", default)]
    pub record_type: String,
    /// Time to live in seconds.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    /// Record values, one string per value.
    #[serde(default)]
    pub values: Vec<String>,
}

/// Body of a record update request; name and type come from the URL.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRecordRequest {
    /// New time to live in seconds.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    /// Replacement values, one string per value.
    #[serde(default)]
    pub values: Vec<String>,
}
