//! Shared helpers for the live integration tests.

#![allow(dead_code)]

use std::env;

use dns_console_provider::{AzureConfig, AzureDnsClient};

/// Skip the test when any of the listed environment variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it (fail the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it (fail the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Environment variables the live tests read.
pub const REQUIRED_ENV_VARS: [&str; 6] = [
    "AZURE_TENANT_ID",
    "AZURE_CLIENT_ID",
    "AZURE_CLIENT_SECRET",
    "AZURE_SUBSCRIPTION_ID",
    "AZURE_RESOURCE_GROUP",
    "AZURE_DNS_ZONE",
];

/// Generate a unique test record name.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Build a client from the `AZURE_*` environment variables.
pub fn client_from_env() -> Option<AzureDnsClient> {
    let config = AzureConfig {
        tenant_id: env::var("AZURE_TENANT_ID").ok()?,
        client_id: env::var("AZURE_CLIENT_ID").ok()?,
        client_secret: env::var("AZURE_CLIENT_SECRET").ok()?,
        subscription_id: env::var("AZURE_SUBSCRIPTION_ID").ok()?,
        resource_group: env::var("AZURE_RESOURCE_GROUP").ok()?,
        dns_zone: env::var("AZURE_DNS_ZONE").ok()?,
    };
    if !config.missing_fields().is_empty() {
        return None;
    }
    Some(AzureDnsClient::new(&config))
}
