//! Conversions between the console's wire record shape and the native
//! record-set representation of the management API.
//!
//! Writing: `values` strings are parsed into [`RecordSetData`]
//! ([`values_to_data`]) and lowered into a PUT body
//! ([`data_to_properties`]). Reading: an API record set is lifted back into a
//! wire [`DnsRecord`] ([`record_set_to_record`]). All parse failures are
//! [`MapperError`]s and happen before any network call.

use thiserror::Error;

use crate::names::{is_valid_hostname, normalize_domain_name, relative_to_full_name};
use crate::types::{
    ARecord, AaaaRecord, CnameRecord, DnsRecord, MxRecord, NsRecord, PtrRecord, RecordSet,
    RecordSetData, RecordSetProperties, RecordType, SrvRecord, TxtRecord,
};

/// Maximum length of a single TXT chunk accepted by the API.
pub const TXT_CHUNK_LEN: usize = 255;

/// A value string (or record set) that does not fit its record type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapperError {
    /// A/AAAA value is not an IP literal of the right family.
    #[error("'{value}' is not a valid {family} address")]
    InvalidIpAddress {
        /// The offending value.
        value: String,
        /// `"IPv4"` or `"IPv6"`.
        family: &'static str,
    },

    /// CNAME/NS/PTR value, MX exchange, or SRV target is not a hostname.
    #[error("'{0}' is not a valid hostname")]
    InvalidHostname(String),

    /// MX value is not of the form `"<priority> <exchange>"`.
    #[error("MX value '{0}' must be of the form '<priority> <exchange>'")]
    InvalidMx(String),

    /// SRV value is not of the form `"<priority> <weight> <port> <target>"`.
    #[error("SRV value '{0}' must be of the form '<priority> <weight> <port> <target>'")]
    InvalidSrv(String),

    /// TXT value is empty.
    #[error("TXT values must not be empty")]
    EmptyTxt,

    /// CNAME record set with more or fewer than one value.
    #[error("CNAME record sets hold exactly one value")]
    CnameCardinality,

    /// Attempt to build a writable payload for an SOA record set.
    #[error("SOA record sets are managed by the zone and cannot be written")]
    SoaNotWritable,

    /// Record set with no values at all.
    #[error("record set has no values")]
    NoValues,

    /// Record set carries no TTL.
    #[error("record set has no TTL")]
    MissingTtl,

    /// ARM resource type outside the nine supported record types.
    #[error("unsupported record set type '{0}'")]
    UnsupportedType(String),
}

/// Convenience alias for mapper results.
pub type MapperResult<T> = std::result::Result<T, MapperError>;

fn parse_ipv4(value: &str) -> MapperResult<ARecord> {
    value
        .parse::<std::net::Ipv4Addr>()
        .map_err(|_| MapperError::InvalidIpAddress {
            value: value.to_string(),
            family: "IPv4",
        })?;
    Ok(ARecord {
        ipv4_address: value.to_string(),
    })
}

fn parse_ipv6(value: &str) -> MapperResult<AaaaRecord> {
    value
        .parse::<std::net::Ipv6Addr>()
        .map_err(|_| MapperError::InvalidIpAddress {
            value: value.to_string(),
            family: "IPv6",
        })?;
    Ok(AaaaRecord {
        ipv6_address: value.to_string(),
    })
}

fn parse_hostname(value: &str) -> MapperResult<String> {
    if is_valid_hostname(value) {
        Ok(value.to_string())
    } else {
        Err(MapperError::InvalidHostname(value.to_string()))
    }
}

/// Parse an MX value string, `"10 mail.example.com"` style.
fn parse_mx(value: &str) -> MapperResult<MxRecord> {
    let (preference, exchange) = value
        .trim()
        .split_once(char::is_whitespace)
        .ok_or_else(|| MapperError::InvalidMx(value.to_string()))?;
    let preference = preference
        .parse::<u16>()
        .map_err(|_| MapperError::InvalidMx(value.to_string()))?;
    let exchange = exchange.trim();
    if !is_valid_hostname(exchange) {
        return Err(MapperError::InvalidHostname(exchange.to_string()));
    }
    Ok(MxRecord {
        preference,
        exchange: exchange.to_string(),
    })
}

/// Parse an SRV value string, `"10 5 443 sip.example.com"` style.
fn parse_srv(value: &str) -> MapperResult<SrvRecord> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [priority, weight, port, target] = parts.as_slice() else {
        return Err(MapperError::InvalidSrv(value.to_string()));
    };
    let parse_u16 =
        |s: &str| s.parse::<u16>().map_err(|_| MapperError::InvalidSrv(value.to_string()));
    let (priority, weight, port) = (parse_u16(priority)?, parse_u16(weight)?, parse_u16(port)?);
    if !is_valid_hostname(target) {
        return Err(MapperError::InvalidHostname((*target).to_string()));
    }
    Ok(SrvRecord {
        priority,
        weight,
        port,
        target: (*target).to_string(),
    })
}

/// Split TXT text into API-sized chunks, respecting char boundaries.
fn split_txt_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if current.len() + ch.len_utf8() > TXT_CHUNK_LEN {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    chunks.push(current);
    chunks
}

/// Parse wire values into typed record-set data.
///
/// Every value is validated independently; the first bad value fails the whole
/// conversion. SOA is refused outright — it is never writable through this
/// system.
pub fn values_to_data(record_type: RecordType, values: &[String]) -> MapperResult<RecordSetData> {
    if values.is_empty() {
        return Err(MapperError::NoValues);
    }
    match record_type {
        RecordType::A => Ok(RecordSetData::A(
            values.iter().map(|v| parse_ipv4(v)).collect::<MapperResult<_>>()?,
        )),
        RecordType::Aaaa => Ok(RecordSetData::Aaaa(
            values.iter().map(|v| parse_ipv6(v)).collect::<MapperResult<_>>()?,
        )),
        RecordType::Cname => {
            let [target] = values else {
                return Err(MapperError::CnameCardinality);
            };
            Ok(RecordSetData::Cname(CnameRecord {
                cname: parse_hostname(target)?,
            }))
        }
        RecordType::Mx => Ok(RecordSetData::Mx(
            values.iter().map(|v| parse_mx(v)).collect::<MapperResult<_>>()?,
        )),
        RecordType::Txt => Ok(RecordSetData::Txt(
            values
                .iter()
                .map(|v| {
                    if v.is_empty() {
                        Err(MapperError::EmptyTxt)
                    } else {
                        Ok(TxtRecord {
                            value: split_txt_chunks(v),
                        })
                    }
                })
                .collect::<MapperResult<_>>()?,
        )),
        RecordType::Ns => Ok(RecordSetData::Ns(
            values
                .iter()
                .map(|v| Ok(NsRecord { nsdname: parse_hostname(v)? }))
                .collect::<MapperResult<_>>()?,
        )),
        RecordType::Ptr => Ok(RecordSetData::Ptr(
            values
                .iter()
                .map(|v| Ok(PtrRecord { ptrdname: parse_hostname(v)? }))
                .collect::<MapperResult<_>>()?,
        )),
        RecordType::Srv => Ok(RecordSetData::Srv(
            values.iter().map(|v| parse_srv(v)).collect::<MapperResult<_>>()?,
        )),
        RecordType::Soa => Err(MapperError::SoaNotWritable),
    }
}

/// Render typed record-set data back into wire value strings.
///
/// TXT chunks are concatenated; SOA is rendered in zone-file field order.
#[must_use]
pub fn data_to_values(data: &RecordSetData) -> Vec<String> {
    match data {
        RecordSetData::A(records) => records.iter().map(|r| r.ipv4_address.clone()).collect(),
        RecordSetData::Aaaa(records) => records.iter().map(|r| r.ipv6_address.clone()).collect(),
        RecordSetData::Cname(record) => vec![record.cname.clone()],
        RecordSetData::Mx(records) => records
            .iter()
            .map(|r| format!("{} {}", r.preference, r.exchange))
            .collect(),
        RecordSetData::Txt(records) => records.iter().map(|r| r.value.concat()).collect(),
        RecordSetData::Ns(records) => records.iter().map(|r| r.nsdname.clone()).collect(),
        RecordSetData::Ptr(records) => records.iter().map(|r| r.ptrdname.clone()).collect(),
        RecordSetData::Srv(records) => records
            .iter()
            .map(|r| format!("{} {} {} {}", r.priority, r.weight, r.port, r.target))
            .collect(),
        RecordSetData::Soa(soa) => vec![format!(
            "{} {} {} {} {} {} {}",
            soa.host,
            soa.email,
            soa.serial_number,
            soa.refresh_time,
            soa.retry_time,
            soa.expire_time,
            soa.minimum_ttl
        )],
    }
}

/// Lower typed data into a PUT-ready `properties` payload.
///
/// SOA data never reaches this function (refused in [`values_to_data`]); it is
/// still lowered faithfully so the conversion stays total.
#[must_use]
pub fn data_to_properties(data: &RecordSetData, ttl: u32) -> RecordSetProperties {
    let mut properties = RecordSetProperties {
        ttl: Some(ttl),
        ..Default::default()
    };
    match data {
        RecordSetData::A(records) => properties.a_records = Some(records.clone()),
        RecordSetData::Aaaa(records) => properties.aaaa_records = Some(records.clone()),
        RecordSetData::Cname(record) => properties.cname_record = Some(record.clone()),
        RecordSetData::Mx(records) => properties.mx_records = Some(records.clone()),
        RecordSetData::Txt(records) => properties.txt_records = Some(records.clone()),
        RecordSetData::Ns(records) => properties.ns_records = Some(records.clone()),
        RecordSetData::Ptr(records) => properties.ptr_records = Some(records.clone()),
        RecordSetData::Srv(records) => properties.srv_records = Some(records.clone()),
        RecordSetData::Soa(soa) => properties.soa_record = Some(soa.clone()),
    }
    properties
}

/// Lift an API `properties` payload into typed data for the given type.
pub fn properties_to_data(
    record_type: RecordType,
    properties: &RecordSetProperties,
) -> MapperResult<RecordSetData> {
    let data = match record_type {
        RecordType::A => properties.a_records.clone().map(RecordSetData::A),
        RecordType::Aaaa => properties.aaaa_records.clone().map(RecordSetData::Aaaa),
        RecordType::Cname => properties.cname_record.clone().map(RecordSetData::Cname),
        RecordType::Mx => properties.mx_records.clone().map(RecordSetData::Mx),
        RecordType::Txt => properties.txt_records.clone().map(RecordSetData::Txt),
        RecordType::Ns => properties.ns_records.clone().map(RecordSetData::Ns),
        RecordType::Ptr => properties.ptr_records.clone().map(RecordSetData::Ptr),
        RecordType::Srv => properties.srv_records.clone().map(RecordSetData::Srv),
        RecordType::Soa => properties.soa_record.clone().map(RecordSetData::Soa),
    };
    match data {
        Some(data) if !data_is_empty(&data) => Ok(data),
        _ => Err(MapperError::NoValues),
    }
}

fn data_is_empty(data: &RecordSetData) -> bool {
    match data {
        RecordSetData::A(records) => records.is_empty(),
        RecordSetData::Aaaa(records) => records.is_empty(),
        RecordSetData::Mx(records) => records.is_empty(),
        RecordSetData::Txt(records) => records.is_empty(),
        RecordSetData::Ns(records) => records.is_empty(),
        RecordSetData::Ptr(records) => records.is_empty(),
        RecordSetData::Srv(records) => records.is_empty(),
        RecordSetData::Cname(_) | RecordSetData::Soa(_) => false,
    }
}

/// Lift an API record set into the wire [`DnsRecord`] shape.
///
/// The fqdn is taken from the API when present (trailing dot stripped) and
/// derived from the name and zone otherwise.
pub fn record_set_to_record(record_set: &RecordSet, zone: &str) -> MapperResult<DnsRecord> {
    let record_type = record_set.record_type().ok_or_else(|| {
        MapperError::UnsupportedType(
            record_set
                .record_set_type
                .clone()
                .unwrap_or_else(|| "<missing>".to_string()),
        )
    })?;
    let ttl = record_set.properties.ttl.ok_or(MapperError::MissingTtl)?;
    let data = properties_to_data(record_type, &record_set.properties)?;
    let fqdn = record_set
        .properties
        .fqdn
        .as_deref()
        .map_or_else(
            || relative_to_full_name(&record_set.name, zone),
            normalize_domain_name,
        );

    Ok(DnsRecord {
        name: record_set.name.clone(),
        fqdn,
        record_type,
        ttl,
        values: data_to_values(&data),
    })
}
