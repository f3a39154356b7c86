//! Service-principal and zone coordinates.

use serde::Deserialize;

/// Everything needed to reach one DNS zone through the management API:
/// the service-principal credentials plus the subscription / resource group /
/// zone triple.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    /// AAD tenant (directory) id.
    pub tenant_id: String,
    /// Service-principal application (client) id.
    pub client_id: String,
    /// Service-principal client secret.
    pub client_secret: String,
    /// Subscription containing the DNS zone.
    pub subscription_id: String,
    /// Resource group containing the DNS zone.
    pub resource_group: String,
    /// Name of the DNS zone, e.g. `"example.com"`.
    pub dns_zone: String,
}

impl AzureConfig {
    /// Names of required fields that are missing or blank.
    ///
    /// An empty result means the configuration is complete.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("tenant_id", &self.tenant_id),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("subscription_id", &self.subscription_id),
            ("resource_group", &self.resource_group),
            ("dns_zone", &self.dns_zone),
        ];
        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> AzureConfig {
        AzureConfig {
            tenant_id: "tenant".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            subscription_id: "sub".to_string(),
            resource_group: "rg".to_string(),
            dns_zone: "example.com".to_string(),
        }
    }

    #[test]
    fn complete_config_has_no_missing_fields() {
        assert!(complete().missing_fields().is_empty());
    }

    #[test]
    fn blank_field_reported() {
        let mut config = complete();
        config.client_secret = "   ".to_string();
        assert_eq!(config.missing_fields(), vec!["client_secret"]);
    }

    #[test]
    fn default_config_reports_all_fields() {
        let missing = AzureConfig::default().missing_fields();
        assert_eq!(missing.len(), 6);
        assert!(missing.contains(&"tenant_id"));
        assert!(missing.contains(&"dns_zone"));
    }
}
