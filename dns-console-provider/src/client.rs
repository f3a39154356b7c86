//! Record-set operations against the Azure DNS management API.
//!
//! [`AzureDnsClient`] is the only component that talks to the network. It
//! owns the authenticated session, performs the four record-set operations
//! for the configured subscription/resource-group/zone triple, and translates
//! API error responses into [`ProviderError`]s.

use async_trait::async_trait;
use reqwest::Client;

use crate::auth::TokenCredential;
use crate::config::AzureConfig;
use crate::error::{ProviderError, Result};
use crate::http::{DEFAULT_MAX_RETRIES, create_http_client, execute_request_with_retry};
use crate::types::{
    ArmErrorResponse, RecordSet, RecordSetBody, RecordSetList, RecordSetProperties, RecordType,
};

/// Management API base.
const ARM_BASE: &str = "https://management.azure.com";
/// DNS record-set API version.
const API_VERSION: &str = "2018-05-01";

/// Record-set operations on one DNS zone.
///
/// This is the seam between the orchestration layer and the network: the
/// record service depends on `Arc<dyn ZoneClient>` and tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait ZoneClient: Send + Sync {
    /// Name of the zone this client operates on.
    fn zone(&self) -> &str;

    /// All record sets in the zone, in API-returned order.
    async fn list_record_sets(&self) -> Result<Vec<RecordSet>>;

    /// The record set at `(record_type, name)`, or `None` if absent.
    async fn get_record_set(&self, record_type: RecordType, name: &str)
    -> Result<Option<RecordSet>>;

    /// Create or wholesale-replace the record set at `(record_type, name)`.
    /// Returns the stored record set as the API reports it back.
    async fn put_record_set(
        &self,
        record_type: RecordType,
        name: &str,
        properties: RecordSetProperties,
    ) -> Result<RecordSet>;

    /// Delete the record set at `(record_type, name)`.
    async fn delete_record_set(&self, record_type: RecordType, name: &str) -> Result<()>;
}

/// [`ZoneClient`] implementation backed by the Azure management API.
pub struct AzureDnsClient {
    client: Client,
    credential: TokenCredential,
    zone_url: String,
    zone: String,
}

impl AzureDnsClient {
    /// Build a client for the zone named in `config`.
    ///
    /// No network I/O happens here; the first token is fetched lazily on the
    /// first operation.
    #[must_use]
    pub fn new(config: &AzureConfig) -> Self {
        let client = create_http_client();
        let credential = TokenCredential::new(
            client.clone(),
            &config.tenant_id,
            config.client_id.clone(),
            config.client_secret.clone(),
        );
        let zone_url = format!(
            "{ARM_BASE}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Network/dnsZones/{}",
            urlencoding::encode(&config.subscription_id),
            urlencoding::encode(&config.resource_group),
            urlencoding::encode(&config.dns_zone),
        );
        Self {
            client,
            credential,
            zone_url,
            zone: config.dns_zone.clone(),
        }
    }

    fn record_set_url(&self, record_type: RecordType, name: &str) -> String {
        format!(
            "{}/{}/{}?api-version={API_VERSION}",
            self.zone_url,
            record_type.as_str(),
            urlencoding::encode(name),
        )
    }

    /// Map a non-2xx management API answer onto [`ProviderError`].
    ///
    /// `record_name` distinguishes a missing record set from a missing zone
    /// on 404; operations that address the whole zone pass `None`.
    fn map_arm_error(&self, status: u16, body: &str, record_name: Option<&str>) -> ProviderError {
        let parsed: ArmErrorResponse = serde_json::from_str(body).unwrap_or_default();
        let (raw_code, raw_message) = parsed
            .error
            .map(|detail| (detail.code, detail.message))
            .unwrap_or_default();
        let message = raw_message.unwrap_or_else(|| {
            if body.is_empty() {
                format!("HTTP {status}")
            } else {
                body.to_string()
            }
        });

        match status {
            400 => ProviderError::InvalidRequest {
                raw_code,
                raw_message: message,
            },
            401 => ProviderError::InvalidCredentials {
                raw_message: Some(message),
            },
            403 => ProviderError::PermissionDenied {
                raw_message: Some(message),
            },
            404 => match record_name {
                Some(name) => ProviderError::RecordNotFound {
                    record_name: name.to_string(),
                    raw_message: Some(message),
                },
                None => ProviderError::ZoneNotFound {
                    zone: self.zone.clone(),
                    raw_message: Some(message),
                },
            },
            409 | 412 => ProviderError::RecordExists {
                record_name: record_name.unwrap_or("<unknown>").to_string(),
                raw_message: Some(message),
            },
            _ => ProviderError::Unknown {
                raw_code,
                raw_message: message,
            },
        }
    }

    fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| {
            log::error!("Failed to parse management API response: {e}");
            ProviderError::ParseError {
                detail: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl ZoneClient for AzureDnsClient {
    fn zone(&self) -> &str {
        &self.zone
    }

    async fn list_record_sets(&self) -> Result<Vec<RecordSet>> {
        let mut url = format!("{}/recordsets?api-version={API_VERSION}", self.zone_url);
        let mut record_sets = Vec::new();

        // The listing is paginated; follow nextLink until exhausted.
        loop {
            let token = self.credential.bearer_token().await?;
            let request = self.client.get(&url).bearer_auth(token);
            let (status, body) =
                execute_request_with_retry(request, "GET", "recordsets", DEFAULT_MAX_RETRIES)
                    .await?;

            if status != 200 {
                return Err(self.map_arm_error(status, &body, None));
            }

            let page: RecordSetList = Self::parse_body(&body)?;
            record_sets.extend(page.value);

            match page.next_link {
                Some(next) => url = next,
                None => break,
            }
        }

        log::debug!("Listed {} record sets in zone {}", record_sets.len(), self.zone);
        Ok(record_sets)
    }

    async fn get_record_set(
        &self,
        record_type: RecordType,
        name: &str,
    ) -> Result<Option<RecordSet>> {
        let url = self.record_set_url(record_type, name);
        let token = self.credential.bearer_token().await?;
        let request = self.client.get(&url).bearer_auth(token);
        let (status, body) =
            execute_request_with_retry(request, "GET", &url, DEFAULT_MAX_RETRIES).await?;

        match status {
            200 => Ok(Some(Self::parse_body(&body)?)),
            // Absence is an expected outcome here: the service probes for
            // existence before create and delete.
            404 => Ok(None),
            _ => Err(self.map_arm_error(status, &body, Some(name))),
        }
    }

    async fn put_record_set(
        &self,
        record_type: RecordType,
        name: &str,
        properties: RecordSetProperties,
    ) -> Result<RecordSet> {
        let url = self.record_set_url(record_type, name);
        let token = self.credential.bearer_token().await?;
        let request = self
            .client
            .put(&url)
            .bearer_auth(token)
            .json(&RecordSetBody { properties });
        let (status, body) =
            execute_request_with_retry(request, "PUT", &url, DEFAULT_MAX_RETRIES).await?;

        match status {
            200 | 201 => Self::parse_body(&body),
            _ => Err(self.map_arm_error(status, &body, Some(name))),
        }
    }

    async fn delete_record_set(&self, record_type: RecordType, name: &str) -> Result<()> {
        let url = self.record_set_url(record_type, name);
        let token = self.credential.bearer_token().await?;
        let request = self.client.delete(&url).bearer_auth(token);
        let (status, body) =
            execute_request_with_retry(request, "DELETE", &url, DEFAULT_MAX_RETRIES).await?;

        match status {
            200 | 202 | 204 => Ok(()),
            404 => Err(ProviderError::RecordNotFound {
                record_name: name.to_string(),
                raw_message: None,
            }),
            _ => Err(self.map_arm_error(status, &body, Some(name))),
        }
    }
}
