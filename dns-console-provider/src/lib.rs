//! # dns-console-provider
//!
//! Azure DNS management API client for the dns-console zone console.
//!
//! The crate owns everything that touches the network: service-principal
//! (client-credentials) token acquisition, the four record-set operations
//! against the ARM endpoint, translation of API failures into
//! [`ProviderError`], and the mapping between the console's wire record shape
//! and the API's native record-set payloads.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_console_provider::{AzureConfig, AzureDnsClient, RecordType, ZoneClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AzureConfig {
//!         tenant_id: "...".to_string(),
//!         client_id: "...".to_string(),
//!         client_secret: "...".to_string(),
//!         subscription_id: "...".to_string(),
//!         resource_group: "dns-rg".to_string(),
//!         dns_zone: "example.com".to_string(),
//!     };
//!     let client = AzureDnsClient::new(&config);
//!
//!     for record_set in client.list_record_sets().await? {
//!         println!("{} {:?}", record_set.name, record_set.record_type());
//!     }
//!
//!     let existing = client.get_record_set(RecordType::A, "www").await?;
//!     println!("www exists: {}", existing.is_some());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Transient
//! failures (`NetworkError`, `Timeout`, `RateLimited`, `ServerError`) are
//! automatically retried with exponential backoff before surfacing; business
//! errors (`InvalidCredentials`, `RecordNotFound`, `RecordExists`, ...) are
//! never retried.
//!
//! ## TLS Backend
//!
//! - **`rustls`** *(default)* — use rustls.
//! - **`native-tls`** — use the platform's native TLS implementation.

mod auth;
mod client;
mod config;
mod error;
mod http;

pub mod mapper;
pub mod names;
pub mod types;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export the client seam and its Azure-backed implementation
pub use client::{AzureDnsClient, ZoneClient};

// Re-export configuration and token plumbing
pub use auth::TokenCredential;
pub use config::AzureConfig;

// Re-export the types the orchestration layer works with
pub use types::{DnsRecord, RecordSet, RecordSetData, RecordSetProperties, RecordType};
