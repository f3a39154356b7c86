//! Unified error taxonomy for the console.

use serde::Serialize;
use thiserror::Error;

// Re-export the adapter error type
pub use dns_console_provider::ProviderError;

use dns_console_provider::mapper::MapperError;

/// Core layer error type.
///
/// Every failure the REST surface can report is one of these variants; the
/// web layer maps them onto HTTP statuses. Validation and policy failures are
/// raised before any network call.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Input failed validation (bad name, TTL, or value syntax).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation targets a protected record set (apex NS/SOA).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A record set with the same name and type already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The addressed record set does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service-principal credentials were rejected.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The management API could not be reached, or kept failing after retries.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Required configuration fields are missing or blank.
    #[error("Configuration incomplete: missing {0}")]
    ConfigIncomplete(String),
}

impl CoreError {
    /// Whether this is expected behavior (user input, resource does not
    /// exist, etc.), used for log level selection.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Forbidden(_)
                | Self::Conflict(_)
                | Self::NotFound(_)
                | Self::Auth(_)
        )
    }
}

/// Translate adapter failures into the console taxonomy.
///
/// Transient classes have already been retried by the adapter; whatever
/// arrives here is final.
impl From<ProviderError> for CoreError {
    fn from(err: ProviderError) -> Self {
        match &err {
            ProviderError::InvalidCredentials { .. } | ProviderError::PermissionDenied { .. } => {
                Self::Auth(err.to_string())
            }
            ProviderError::RecordNotFound { .. } | ProviderError::ZoneNotFound { .. } => {
                Self::NotFound(err.to_string())
            }
            ProviderError::RecordExists { .. } => Self::Conflict(err.to_string()),
            ProviderError::InvalidRequest { .. } => Self::Validation(err.to_string()),
            ProviderError::NetworkError { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
            | ProviderError::ServerError { .. }
            | ProviderError::ParseError { .. }
            | ProviderError::SerializationError { .. }
            | ProviderError::Unknown { .. } => Self::ProviderUnavailable(err.to_string()),
        }
    }
}

impl From<MapperError> for CoreError {
    fn from(err: MapperError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Core layer Result type alias.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
