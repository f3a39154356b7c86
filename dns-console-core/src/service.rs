//! Record service: orchestrates validation, mapping, and provider calls.

use std::sync::Arc;

use dns_console_provider::mapper;
use dns_console_provider::{DnsRecord, RecordSet, ZoneClient};

use crate::error::{CoreError, CoreResult};
use crate::types::{CreateRecordRequest, UpdateRecordRequest};
use crate::validation;

/// List/create/update/delete operations on the configured zone.
///
/// The service holds no state of its own — the provider is the single source
/// of truth, and every operation is one validation pass plus one or two
/// round trips through the [`ZoneClient`] seam.
pub struct RecordService {
    client: Arc<dyn ZoneClient>,
}

impl RecordService {
    /// Create a service over the given zone client.
    #[must_use]
    pub fn new(client: Arc<dyn ZoneClient>) -> Self {
        Self { client }
    }

    /// Name of the zone this service manages.
    #[must_use]
    pub fn zone(&self) -> &str {
        self.client.zone()
    }

    /// A successfully stored record set that cannot be lifted back into the
    /// wire shape is a provider contract violation, not a caller mistake.
    fn lift(&self, record_set: &RecordSet) -> CoreResult<DnsRecord> {
        mapper::record_set_to_record(record_set, self.client.zone()).map_err(|e| {
            CoreError::ProviderUnavailable(format!("unexpected record set in API response: {e}"))
        })
    }

    /// All record sets in the zone, in provider-returned order.
    ///
    /// Record sets of types this console does not handle are skipped with a
    /// warning rather than failing the whole listing.
    pub async fn list_records(&self) -> CoreResult<Vec<DnsRecord>> {
        let record_sets = self.client.list_record_sets().await?;
        let zone = self.client.zone();
        let mut records = Vec::with_capacity(record_sets.len());
        for record_set in &record_sets {
            match mapper::record_set_to_record(record_set, zone) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping record set '{}': {e}", record_set.name),
            }
        }
        Ok(records)
    }

    /// Create a record set. Strict create-only: an existing record set with
    /// the same `(name, type)` key is a [`CoreError::Conflict`], never a
    /// silent overwrite.
    ///
    /// Returns the record as read back from the provider, reflecting any
    /// normalization it applied.
    pub async fn create_record(&self, request: &CreateRecordRequest) -> CoreResult<DnsRecord> {
        let (record_type, data) = validation::validate_record(
            &request.name,
            &request.record_type,
            request.ttl,
            &request.values,
        )?;

        if self
            .client
            .get_record_set(record_type, &request.name)
            .await?
            .is_some()
        {
            return Err(CoreError::Conflict(format!(
                "A {record_type} record set named '{}' already exists",
                request.name
            )));
        }

        let properties = mapper::data_to_properties(&data, request.ttl);
        let stored = self
            .client
            .put_record_set(record_type, &request.name, properties)
            .await?;
        self.lift(&stored)
    }

    /// Replace the TTL and values of an existing record set wholesale.
    pub async fn update_record(
        &self,
        name: &str,
        record_type: &str,
        request: &UpdateRecordRequest,
    ) -> CoreResult<DnsRecord> {
        let (record_type, data) =
            validation::validate_record(name, record_type, request.ttl, &request.values)?;

        if self
            .client
            .get_record_set(record_type, name)
            .await?
            .is_none()
        {
            return Err(CoreError::NotFound(format!(
                "No {record_type} record set named '{name}' exists"
            )));
        }

        let properties = mapper::data_to_properties(&data, request.ttl);
        let stored = self
            .client
            .put_record_set(record_type, name, properties)
            .await?;
        self.lift(&stored)
    }

    /// Delete a record set. Deleting an absent key surfaces
    /// [`CoreError::NotFound`]; callers wanting idempotence treat that as
    /// success.
    pub async fn delete_record(&self, name: &str, record_type: &str) -> CoreResult<()> {
        let record_type = validation::validate_key(name, record_type)?;

        if self
            .client
            .get_record_set(record_type, name)
            .await?
            .is_none()
        {
            return Err(CoreError::NotFound(format!(
                "No {record_type} record set named '{name}' exists"
            )));
        }

        self.client.delete_record_set(record_type, name).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use dns_console_provider::names::relative_to_full_name;
    use dns_console_provider::types::{RecordSetProperties, SoaRecord};
    use dns_console_provider::{ProviderError, RecordType};

    use super::*;

    const ZONE: &str = "example.com";

    struct MockZoneClient {
        records: Mutex<Vec<RecordSet>>,
        calls: AtomicUsize,
        puts: AtomicUsize,
    }

    impl MockZoneClient {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                puts: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn put_count(&self) -> usize {
            self.puts.load(Ordering::SeqCst)
        }

        fn make_record_set(
            type_segment: &str,
            name: &str,
            mut properties: RecordSetProperties,
        ) -> RecordSet {
            // Azure reports fqdns with a trailing dot.
            properties.fqdn = Some(format!("{}.", relative_to_full_name(name, ZONE)));
            RecordSet {
                id: None,
                name: name.to_string(),
                record_set_type: Some(format!("Microsoft.Network/dnszones/{type_segment}")),
                etag: None,
                properties,
            }
        }

        /// Seed a record set directly, bypassing the counters.
        fn seed(&self, type_segment: &str, name: &str, properties: RecordSetProperties) {
            self.records
                .lock()
                .unwrap()
                .push(Self::make_record_set(type_segment, name, properties));
        }

        fn seed_values(&self, record_type: RecordType, name: &str, ttl: u32, values: &[&str]) {
            let values: Vec<String> = values.iter().map(ToString::to_string).collect();
            let data = mapper::values_to_data(record_type, &values).unwrap();
            self.seed(
                record_type.as_str(),
                name,
                mapper::data_to_properties(&data, ttl),
            );
        }
    }

    #[async_trait]
    impl ZoneClient for MockZoneClient {
        fn zone(&self) -> &str {
            ZONE
        }

        async fn list_record_sets(&self) -> Result<Vec<RecordSet>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.lock().unwrap().clone())
        }

        async fn get_record_set(
            &self,
            record_type: RecordType,
            name: &str,
        ) -> Result<Option<RecordSet>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|rs| rs.name == name && rs.record_type() == Some(record_type))
                .cloned())
        }

        async fn put_record_set(
            &self,
            record_type: RecordType,
            name: &str,
            properties: RecordSetProperties,
        ) -> Result<RecordSet, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.puts.fetch_add(1, Ordering::SeqCst);
            let record_set = Self::make_record_set(record_type.as_str(), name, properties);
            let mut records = self.records.lock().unwrap();
            if let Some(existing) = records
                .iter_mut()
                .find(|rs| rs.name == name && rs.record_type() == Some(record_type))
            {
                *existing = record_set.clone();
            } else {
                records.push(record_set.clone());
            }
            Ok(record_set)
        }

        async fn delete_record_set(
            &self,
            record_type: RecordType,
            name: &str,
        ) -> Result<(), ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|rs| !(rs.name == name && rs.record_type() == Some(record_type)));
            if records.len() == before {
                return Err(ProviderError::RecordNotFound {
                    record_name: name.to_string(),
                    raw_message: None,
                });
            }
            Ok(())
        }
    }

    /// A client whose every operation fails with a post-retry server error.
    struct FailingZoneClient;

    #[async_trait]
    impl ZoneClient for FailingZoneClient {
        fn zone(&self) -> &str {
            ZONE
        }

        async fn list_record_sets(&self) -> Result<Vec<RecordSet>, ProviderError> {
            Err(ProviderError::ServerError {
                status: 503,
                raw_message: None,
            })
        }

        async fn get_record_set(
            &self,
            _record_type: RecordType,
            _name: &str,
        ) -> Result<Option<RecordSet>, ProviderError> {
            Err(ProviderError::ServerError {
                status: 503,
                raw_message: None,
            })
        }

        async fn put_record_set(
            &self,
            _record_type: RecordType,
            _name: &str,
            _properties: RecordSetProperties,
        ) -> Result<RecordSet, ProviderError> {
            Err(ProviderError::ServerError {
                status: 503,
                raw_message: None,
            })
        }

        async fn delete_record_set(
            &self,
            _record_type: RecordType,
            _name: &str,
        ) -> Result<(), ProviderError> {
            Err(ProviderError::ServerError {
                status: 503,
                raw_message: None,
            })
        }
    }

    fn service_with_mock() -> (RecordService, Arc<MockZoneClient>) {
        let mock = Arc::new(MockZoneClient::new());
        (RecordService::new(mock.clone()), mock)
    }

    fn create_request(name: &str, record_type: &str, ttl: u32, values: &[&str]) -> CreateRecordRequest {
        CreateRecordRequest {
            name: name.to_string(),
            record_type: record_type.to_string(),
            ttl,
            values: values.iter().map(ToString::to_string).collect(),
        }
    }

    fn update_request(ttl: u32, values: &[&str]) -> UpdateRecordRequest {
        UpdateRecordRequest {
            ttl,
            values: values.iter().map(ToString::to_string).collect(),
        }
    }

    // ---- Create ----

    #[tokio::test]
    async fn create_then_list_round_trip() {
        let (service, _mock) = service_with_mock();
        let created = service
            .create_record(&create_request("www", "A", 3600, &["192.0.2.10"]))
            .await
            .unwrap();
        assert_eq!(created.name, "www");
        assert_eq!(created.fqdn, "www.example.com");
        assert_eq!(created.ttl, 3600);

        let records = service.list_records().await.unwrap();
        let found = records
            .iter()
            .find(|r| r.name == "www" && r.record_type == RecordType::A)
            .unwrap();
        assert_eq!(found.values, vec!["192.0.2.10".to_string()]);
    }

    #[tokio::test]
    async fn create_missing_values_makes_no_network_call() {
        let (service, mock) = service_with_mock();
        let err = service
            .create_record(&create_request("www", "A", 3600, &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn create_zero_ttl_makes_no_network_call() {
        let (service, mock) = service_with_mock();
        let err = service
            .create_record(&create_request("www", "A", 0, &["192.0.2.10"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn create_malformed_mx_makes_no_network_call() {
        let (service, mock) = service_with_mock();
        let err = service
            .create_record(&create_request("@", "MX", 3600, &["mail.example.com"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn create_unsupported_type_makes_no_network_call() {
        let (service, mock) = service_with_mock();
        let err = service
            .create_record(&create_request("www", "LOC", 3600, &["x"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn create_multi_value_cname_rejected() {
        let (service, mock) = service_with_mock();
        let err = service
            .create_record(&create_request(
                "alias",
                "CNAME",
                3600,
                &["a.example.com", "b.example.com"],
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn create_duplicate_conflicts_and_preserves_existing() {
        let (service, mock) = service_with_mock();
        mock.seed_values(RecordType::A, "www", 3600, &["192.0.2.10"]);

        let err = service
            .create_record(&create_request("www", "A", 600, &["192.0.2.99"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
        assert_eq!(mock.put_count(), 0);

        let records = service.list_records().await.unwrap();
        let found = records.iter().find(|r| r.name == "www").unwrap();
        assert_eq!(found.values, vec!["192.0.2.10".to_string()]);
        assert_eq!(found.ttl, 3600);
    }

    #[tokio::test]
    async fn create_same_name_different_type_allowed() {
        let (service, _mock) = service_with_mock();
        service
            .create_record(&create_request("www", "A", 3600, &["192.0.2.10"]))
            .await
            .unwrap();
        service
            .create_record(&create_request("www", "TXT", 3600, &["v=spf1 -all"]))
            .await
            .unwrap();
        assert_eq!(service.list_records().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_mx_round_trips_value_string() {
        let (service, _mock) = service_with_mock();
        let created = service
            .create_record(&create_request("@", "MX", 3600, &["10 mail.example.com"]))
            .await
            .unwrap();
        assert_eq!(created.values, vec!["10 mail.example.com".to_string()]);
    }

    // ---- Protected records ----

    #[tokio::test]
    async fn apex_ns_mutations_forbidden() {
        let (service, mock) = service_with_mock();
        mock.seed_values(RecordType::Ns, "@", 172_800, &["ns1-01.azure-dns.com."]);

        let err = service
            .create_record(&create_request("@", "NS", 3600, &["ns1.example.net"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));

        let err = service
            .update_record("@", "NS", &update_request(3600, &["ns1.example.net"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));

        let err = service.delete_record("@", "NS").await.unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));

        // The guard fires before any provider call.
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn apex_soa_mutations_forbidden() {
        let (service, mock) = service_with_mock();

        let err = service
            .create_record(&create_request("@", "SOA", 3600, &["whatever"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));

        let err = service
            .update_record("@", "SOA", &update_request(3600, &["whatever"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));

        let err = service.delete_record("@", "SOA").await.unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));

        assert_eq!(mock.call_count(), 0);
    }

    // ---- Update ----

    #[tokio::test]
    async fn update_missing_record_not_found() {
        let (service, _mock) = service_with_mock();
        let err = service
            .update_record("ghost", "A", &update_request(3600, &["192.0.2.10"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_replaces_values_wholesale() {
        let (service, _mock) = service_with_mock();
        service
            .create_record(&create_request("www", "A", 3600, &["192.0.2.10", "192.0.2.11"]))
            .await
            .unwrap();

        let updated = service
            .update_record("www", "A", &update_request(600, &["192.0.2.20"]))
            .await
            .unwrap();
        assert_eq!(updated.ttl, 600);
        assert_eq!(updated.values, vec!["192.0.2.20".to_string()]);

        let records = service.list_records().await.unwrap();
        let found = records.iter().find(|r| r.name == "www").unwrap();
        assert_eq!(found.values, vec!["192.0.2.20".to_string()]);
    }

    #[tokio::test]
    async fn update_invalid_values_makes_no_network_call() {
        let (service, mock) = service_with_mock();
        mock.seed_values(RecordType::A, "www", 3600, &["192.0.2.10"]);

        let err = service
            .update_record("www", "A", &update_request(3600, &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(mock.call_count(), 0);
    }

    // ---- Delete ----

    #[tokio::test]
    async fn delete_then_second_delete_not_found() {
        let (service, _mock) = service_with_mock();
        service
            .create_record(&create_request("www", "A", 3600, &["192.0.2.10"]))
            .await
            .unwrap();

        service.delete_record("www", "A").await.unwrap();
        assert!(service.list_records().await.unwrap().is_empty());

        let err = service.delete_record("www", "A").await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    // ---- List ----

    #[tokio::test]
    async fn list_skips_unsupported_record_types() {
        let (service, mock) = service_with_mock();
        mock.seed_values(RecordType::A, "www", 3600, &["192.0.2.10"]);
        mock.seed("CAA", "@", RecordSetProperties {
            ttl: Some(3600),
            ..Default::default()
        });

        let records = service.list_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "www");
    }

    #[tokio::test]
    async fn list_renders_soa_read_only() {
        let (service, mock) = service_with_mock();
        mock.seed(
            "SOA",
            "@",
            RecordSetProperties {
                ttl: Some(3600),
                soa_record: Some(SoaRecord {
                    host: "ns1-01.azure-dns.com.".to_string(),
                    email: "azuredns-hostmaster.microsoft.com".to_string(),
                    serial_number: 1,
                    refresh_time: 3600,
                    retry_time: 300,
                    expire_time: 2_419_200,
                    minimum_ttl: 300,
                }),
                ..Default::default()
            },
        );

        let records = service.list_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record_type, RecordType::Soa);
        assert_eq!(records[0].fqdn, "example.com");
        assert!(records[0].values[0].starts_with("ns1-01.azure-dns.com."));
    }

    #[tokio::test]
    async fn list_failure_maps_to_provider_unavailable() {
        let service = RecordService::new(Arc::new(FailingZoneClient));
        let err = service.list_records().await.unwrap_err();
        assert!(matches!(err, CoreError::ProviderUnavailable(_)));
    }

    // ---- End to end ----

    #[tokio::test]
    async fn end_to_end_create_update_delete() {
        let (service, _mock) = service_with_mock();

        // Create
        let created = service
            .create_record(&create_request("www", "A", 3600, &["192.0.2.10"]))
            .await
            .unwrap();
        assert_eq!(created.fqdn, "www.example.com");

        let records = service.list_records().await.unwrap();
        assert!(records.iter().any(|r| {
            r.fqdn == "www.example.com" && r.values == vec!["192.0.2.10".to_string()]
        }));

        // Update
        service
            .update_record("www", "A", &update_request(3600, &["192.0.2.20"]))
            .await
            .unwrap();
        let records = service.list_records().await.unwrap();
        let found = records.iter().find(|r| r.name == "www").unwrap();
        assert_eq!(found.values, vec!["192.0.2.20".to_string()]);
        assert!(!found.values.contains(&"192.0.2.10".to_string()));

        // Delete
        service.delete_record("www", "A").await.unwrap();
        let records = service.list_records().await.unwrap();
        assert!(records.iter().all(|r| r.name != "www"));

        // Second delete surfaces NotFound
        let err = service.delete_record("www", "A").await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }
}
