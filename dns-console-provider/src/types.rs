use serde::{Deserialize, Serialize};

use crate::names::relative_to_full_name;

// ============ Record Types ============

/// DNS record type identifier.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.), which is
/// also the path segment the management API uses to address a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Start of authority record. Zone infrastructure; read-only in this system.
    Soa,
    /// Pointer record.
    Ptr,
    /// Service locator record.
    Srv,
}

impl RecordType {
    /// All supported record types, in a stable order.
    pub const ALL: [Self; 9] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Ns,
        Self::Soa,
        Self::Ptr,
        Self::Srv,
    ];

    /// Parse a record type from its wire/API string, case-insensitively.
    ///
    /// Returns `None` for anything outside the nine supported types.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "AAAA" => Some(Self::Aaaa),
            "CNAME" => Some(Self::Cname),
            "MX" => Some(Self::Mx),
            "TXT" => Some(Self::Txt),
            "NS" => Some(Self::Ns),
            "SOA" => Some(Self::Soa),
            "PTR" => Some(Self::Ptr),
            "SRV" => Some(Self::Srv),
            _ => None,
        }
    }

    /// The uppercase wire string for this type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Ptr => "PTR",
            Self::Srv => "SRV",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Wire Model ============

/// A DNS record set in the console's wire representation.
///
/// `values` carries one string per value; the string format depends on
/// [`record_type`](Self::record_type) (an IP literal for A/AAAA,
/// `"<priority> <exchange>"` for MX, and so on — see the mapper).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Relative record name; `"@"` denotes the zone apex.
    pub name: String,
    /// Fully-qualified name derived from `name` and the zone, without a
    /// trailing dot.
    pub fqdn: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Record values; never empty.
    pub values: Vec<String>,
}

impl DnsRecord {
    /// Build a wire record, deriving `fqdn` from the name and zone.
    #[must_use]
    pub fn new(name: &str, record_type: RecordType, ttl: u32, values: Vec<String>, zone: &str) -> Self {
        Self {
            name: name.to_string(),
            fqdn: relative_to_full_name(name, zone),
            record_type,
            ttl,
            values,
        }
    }
}

// ============ Native Value Structs ============
//
// Field names mirror the ARM record-set JSON exactly (via serde renames), so
// these structs serialize straight into request bodies.

/// An IPv4 address entry of an A record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ARecord {
    /// IPv4 address (e.g., `"192.0.2.10"`).
    pub ipv4_address: String,
}

/// An IPv6 address entry of an AAAA record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AaaaRecord {
    /// IPv6 address (e.g., `"2001:db8::1"`).
    pub ipv6_address: String,
}

/// The single alias target of a CNAME record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnameRecord {
    /// Target hostname.
    pub cname: String,
}

/// A mail exchange entry of an MX record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxRecord {
    /// Priority (lower = preferred).
    pub preference: u16,
    /// Mail server hostname.
    pub exchange: String,
}

/// A text entry of a TXT record set.
///
/// The API splits long text into chunks of at most 255 characters; `value`
/// holds the chunks in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxtRecord {
    /// Text chunks.
    pub value: Vec<String>,
}

/// A name server entry of an NS record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NsRecord {
    /// Name server hostname.
    pub nsdname: String,
}

/// A pointer entry of a PTR record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtrRecord {
    /// Target hostname.
    pub ptrdname: String,
}

/// A service locator entry of an SRV record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrvRecord {
    /// Priority (lower = preferred).
    pub priority: u16,
    /// Weight for load balancing among same-priority targets.
    pub weight: u16,
    /// TCP/UDP port number.
    pub port: u16,
    /// Target hostname providing the service.
    pub target: String,
}

/// The start-of-authority data of the zone. Managed by the provider,
/// never written by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoaRecord {
    /// Primary name server.
    pub host: String,
    /// Responsible-party email, in domain-name form.
    pub email: String,
    /// Zone serial number.
    pub serial_number: i64,
    /// Refresh interval in seconds.
    pub refresh_time: i64,
    /// Retry interval in seconds.
    pub retry_time: i64,
    /// Expire time in seconds.
    pub expire_time: i64,
    /// Negative-caching TTL in seconds.
    #[serde(rename = "minimumTTL")]
    pub minimum_ttl: i64,
}

// ============ Record Set Data ============

/// Type-safe contents of a record set, one variant per supported type.
///
/// Keying the data by record type makes the mapper's `match` arms exhaustive:
/// adding a tenth record type will not compile until every conversion handles
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSetData {
    /// A record set contents.
    A(Vec<ARecord>),
    /// AAAA record set contents.
    Aaaa(Vec<AaaaRecord>),
    /// CNAME record set contents (exactly one target).
    Cname(CnameRecord),
    /// MX record set contents.
    Mx(Vec<MxRecord>),
    /// TXT record set contents.
    Txt(Vec<TxtRecord>),
    /// NS record set contents.
    Ns(Vec<NsRecord>),
    /// SOA record set contents (read-only).
    Soa(SoaRecord),
    /// PTR record set contents.
    Ptr(Vec<PtrRecord>),
    /// SRV record set contents.
    Srv(Vec<SrvRecord>),
}

impl RecordSetData {
    /// Returns the [`RecordType`] discriminant for this data.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A(_) => RecordType::A,
            Self::Aaaa(_) => RecordType::Aaaa,
            Self::Cname(_) => RecordType::Cname,
            Self::Mx(_) => RecordType::Mx,
            Self::Txt(_) => RecordType::Txt,
            Self::Ns(_) => RecordType::Ns,
            Self::Soa(_) => RecordType::Soa,
            Self::Ptr(_) => RecordType::Ptr,
            Self::Srv(_) => RecordType::Srv,
        }
    }
}

// ============ ARM Envelopes ============

/// The `properties` object of an ARM record set, with one optional array
/// (or struct) per record type.
///
/// This is the loose shape the API speaks; [`RecordSetData`] is the typed
/// view the rest of the system works with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSetProperties {
    /// Time to live in seconds.
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Fully-qualified name as reported by the API (with trailing dot).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    /// A record entries.
    #[serde(rename = "ARecords", skip_serializing_if = "Option::is_none")]
    pub a_records: Option<Vec<ARecord>>,
    /// AAAA record entries.
    #[serde(rename = "AAAARecords", skip_serializing_if = "Option::is_none")]
    pub aaaa_records: Option<Vec<AaaaRecord>>,
    /// CNAME record entry.
    #[serde(rename = "CNAMERecord", skip_serializing_if = "Option::is_none")]
    pub cname_record: Option<CnameRecord>,
    /// MX record entries.
    #[serde(rename = "MXRecords", skip_serializing_if = "Option::is_none")]
    pub mx_records: Option<Vec<MxRecord>>,
    /// TXT record entries.
    #[serde(rename = "TXTRecords", skip_serializing_if = "Option::is_none")]
    pub txt_records: Option<Vec<TxtRecord>>,
    /// NS record entries.
    #[serde(rename = "NSRecords", skip_serializing_if = "Option::is_none")]
    pub ns_records: Option<Vec<NsRecord>>,
    /// PTR record entries.
    #[serde(rename = "PTRRecords", skip_serializing_if = "Option::is_none")]
    pub ptr_records: Option<Vec<PtrRecord>>,
    /// SRV record entries.
    #[serde(rename = "SRVRecords", skip_serializing_if = "Option::is_none")]
    pub srv_records: Option<Vec<SrvRecord>>,
    /// SOA record entry.
    #[serde(rename = "SOARecord", skip_serializing_if = "Option::is_none")]
    pub soa_record: Option<SoaRecord>,
}

/// A record set as returned by the management API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// ARM resource id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Relative record set name; `"@"` for the zone apex.
    pub name: String,
    /// ARM resource type, e.g. `"Microsoft.Network/dnszones/A"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_set_type: Option<String>,
    /// Concurrency etag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// Record set contents.
    pub properties: RecordSetProperties,
}

impl RecordSet {
    /// The [`RecordType`] parsed from the ARM resource type's last segment,
    /// or `None` for types this system does not handle.
    #[must_use]
    pub fn record_type(&self) -> Option<RecordType> {
        let type_str = self.record_set_type.as_deref()?;
        RecordType::parse(type_str.rsplit('/').next().unwrap_or(type_str))
    }
}

/// One page of an ARM record-set listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordSetList {
    /// Record sets in this page.
    #[serde(default)]
    pub value: Vec<RecordSet>,
    /// Absolute URL of the next page, when there is one.
    #[serde(rename = "nextLink", default)]
    pub next_link: Option<String>,
}

/// Body of a record-set PUT request.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSetBody {
    /// Record set contents.
    pub properties: RecordSetProperties,
}

/// ARM error envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArmErrorResponse {
    /// Error payload.
    #[serde(default)]
    pub error: Option<ArmErrorDetail>,
}

/// The `code`/`message` pair inside an ARM error envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArmErrorDetail {
    /// Machine-readable error code, e.g. `"ResourceNotFound"`.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}
