//! DNS name handling helpers.

/// Maximum length of a full DNS name.
pub const MAX_NAME_LEN: usize = 253;
/// Maximum length of a single DNS label.
pub const MAX_LABEL_LEN: usize = 63;

/// Strip the trailing dot from a domain name.
#[must_use]
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// Convert a full domain name to a name relative to the zone.
/// e.g. `"www.example.com"` + `"example.com"` -> `"www"`,
/// `"example.com"` + `"example.com"` -> `"@"`.
#[must_use]
pub fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = normalize_domain_name(full_name);
    let zone = normalize_domain_name(zone_name);

    if full == zone {
        "@".to_string()
    } else if let Some(subdomain) = full.strip_suffix(&format!(".{zone}")) {
        subdomain.to_string()
    } else {
        full
    }
}

/// Convert a zone-relative name to a full domain name.
/// e.g. `"www"` + `"example.com"` -> `"www.example.com"`,
/// `"@"` + `"example.com"` -> `"example.com"`.
#[must_use]
pub fn relative_to_full_name(relative_name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);

    if relative_name == "@" || relative_name.is_empty() {
        zone
    } else {
        format!("{relative_name}.{zone}")
    }
}

/// Whether `label` is a syntactically valid DNS label.
///
/// Alphanumerics, hyphens, and underscores (service labels like `_sip` and
/// `_dmarc` are in everyday use); no leading or trailing hyphen; at most
/// [`MAX_LABEL_LEN`] characters.
#[must_use]
pub fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Whether `name` is a syntactically valid hostname (A/AAAA owner, CNAME/NS
/// target, MX exchange, SRV target, ...). A single trailing dot is accepted.
#[must_use]
pub fn is_valid_hostname(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }
    name.split('.').all(is_valid_label)
}

/// Whether `name` is a valid zone-relative record name: `"@"`, or labels
/// separated by dots, where the leftmost label may be the wildcard `"*"`.
#[must_use]
pub fn is_valid_record_name(name: &str) -> bool {
    if name == "@" {
        return true;
    }
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }
    let mut labels = name.split('.');
    let Some(first) = labels.next() else {
        return false;
    };
    if first != "*" && !is_valid_label(first) {
        return false;
    }
    labels.all(is_valid_label)
}
