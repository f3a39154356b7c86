//! dns-console core library
//!
//! Validation and orchestration for the zone console:
//! - request validation (DNS name/TTL/value syntax, protected-record policy)
//! - the record service composing validation, mapping, and provider calls
//! - the error taxonomy the REST surface reports
//!
//! All network I/O lives behind the `ZoneClient` seam in
//! `dns-console-provider`; this crate is pure orchestration and is tested
//! against an in-memory client.

pub mod config;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use service::RecordService;
pub use types::{CreateRecordRequest, UpdateRecordRequest, DEFAULT_TTL};
