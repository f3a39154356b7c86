//! Configuration completeness checks.

use dns_console_provider::AzureConfig;

use crate::error::{CoreError, CoreResult};

/// Verify that all six credential/zone fields are present and non-blank.
///
/// Checked once at startup; an incomplete configuration refuses to operate
/// rather than failing on the first request.
pub fn validate_config(config: &AzureConfig) -> CoreResult<()> {
    let missing = config.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::ConfigIncomplete(missing.join(", ")))
    }
}
