use serde::{Deserialize, Serialize};

/// Unified error type for all Azure DNS operations.
///
/// Variants carry the context needed to map the error onto the console's
/// HTTP surface, plus the raw API message where one was available.
/// All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — API rate limit exceeded (HTTP 429)
/// - [`ServerError`](Self::ServerError) — ARM-side 5xx failure
///
/// The built-in HTTP plumbing automatically retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    ///
    /// This is a transient error and is automatically retried.
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    ///
    /// This is a transient error and is automatically retried.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    ///
    /// This is a transient error; the request should succeed after waiting.
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The management API answered with a 5xx status.
    ///
    /// This is a transient error and is automatically retried.
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The service-principal credentials are invalid or expired (HTTP 401,
    /// or a rejection from the token endpoint).
    InvalidCredentials {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The service principal lacks permission for the requested operation (HTTP 403).
    PermissionDenied {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The addressed record set was not found (HTTP 404).
    RecordNotFound {
        /// Relative name of the record set.
        record_name: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The configured DNS zone (or the resource group/subscription path above
    /// it) was not found (HTTP 404).
    ZoneNotFound {
        /// Zone name that was not found.
        zone: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A record set with the same name/type already exists (HTTP 409/412).
    RecordExists {
        /// Relative name of the conflicting record set.
        record_name: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The management API rejected the request as malformed (HTTP 400).
    InvalidRequest {
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the API.
    ///
    /// This is a catch-all for responses not yet mapped to a specific variant.
    Unknown {
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether this is expected behavior (user input, resource does not exist,
    /// etc.), used for log level selection.
    ///
    /// Level `warn` should be used when returning `true`, `error` otherwise.
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::RecordNotFound { .. }
                | Self::ZoneNotFound { .. }
                | Self::RecordExists { .. }
                | Self::InvalidRequest { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => {
                write!(f, "Network error: {detail}")
            }
            Self::Timeout { detail } => {
                write!(f, "Request timeout: {detail}")
            }
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited")
                }
            }
            Self::ServerError {
                status,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "Server error (HTTP {status}): {msg}")
                } else {
                    write!(f, "Server error (HTTP {status})")
                }
            }
            Self::InvalidCredentials { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Invalid credentials: {msg}")
                } else {
                    write!(f, "Invalid credentials")
                }
            }
            Self::PermissionDenied { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Permission denied: {msg}")
                } else {
                    write!(f, "Permission denied")
                }
            }
            Self::RecordNotFound { record_name, .. } => {
                write!(f, "Record set '{record_name}' not found")
            }
            Self::ZoneNotFound { zone, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "DNS zone '{zone}' not found: {msg}")
                } else {
                    write!(f, "DNS zone '{zone}' not found")
                }
            }
            Self::RecordExists { record_name, .. } => {
                write!(f, "Record set '{record_name}' already exists")
            }
            Self::InvalidRequest { raw_message, .. } => {
                write!(f, "Rejected by the management API: {raw_message}")
            }
            Self::ParseError { detail } => {
                write!(f, "Parse error: {detail}")
            }
            Self::SerializationError { detail } => {
                write!(f, "Serialization error: {detail}")
            }
            Self::Unknown { raw_message, .. } => {
                write!(f, "{raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
