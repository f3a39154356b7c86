//! Request validation, applied before any provider call.
//!
//! Rules run in a fixed order and the first failure wins. The protected-record
//! guard outranks value checks: apex NS/SOA mutations are `Forbidden`
//! regardless of how the rest of the request looks.

use dns_console_provider::mapper;
use dns_console_provider::names::is_valid_record_name;
use dns_console_provider::{RecordSetData, RecordType};

use crate::error::{CoreError, CoreResult};

/// Whether `(name, record_type)` addresses a protected record set.
///
/// The apex NS and SOA record sets are zone infrastructure, owned by the
/// provider; this system never creates, updates, or deletes them.
#[must_use]
pub fn is_protected(name: &str, record_type: RecordType) -> bool {
    name == "@" && matches!(record_type, RecordType::Ns | RecordType::Soa)
}

fn validate_name(name: &str) -> CoreResult<()> {
    if name.is_empty() {
        return Err(CoreError::Validation("record name is required".to_string()));
    }
    if !is_valid_record_name(name) {
        return Err(CoreError::Validation(format!(
            "'{name}' is not a valid record name"
        )));
    }
    Ok(())
}

fn parse_type(record_type: &str) -> CoreResult<RecordType> {
    RecordType::parse(record_type).ok_or_else(|| {
        CoreError::Validation(format!("Unsupported record type: {record_type}"))
    })
}

fn check_protected(name: &str, record_type: RecordType) -> CoreResult<()> {
    if is_protected(name, record_type) {
        return Err(CoreError::Forbidden(format!(
            "The zone's root {record_type} record set is managed by the provider and cannot be modified"
        )));
    }
    Ok(())
}

/// Validate the addressing key of a delete request.
pub fn validate_key(name: &str, record_type: &str) -> CoreResult<RecordType> {
    validate_name(name)?;
    let record_type = parse_type(record_type)?;
    check_protected(name, record_type)?;
    Ok(record_type)
}

/// Validate a full candidate record and parse its values.
///
/// Returns the parsed type and native data so callers do not parse twice.
/// Per-value syntax is delegated to the mapper — one source of truth for what
/// each record type accepts — and is atomic: a single bad value fails the
/// whole request.
pub fn validate_record(
    name: &str,
    record_type: &str,
    ttl: u32,
    values: &[String],
) -> CoreResult<(RecordType, RecordSetData)> {
    validate_name(name)?;
    let record_type = parse_type(record_type)?;
    check_protected(name, record_type)?;
    if ttl == 0 {
        return Err(CoreError::Validation(
            "TTL must be a positive number of seconds".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(CoreError::Validation(
            "at least one value is required".to_string(),
        ));
    }
    let data = mapper::values_to_data(record_type, values)?;
    Ok((record_type, data))
}
