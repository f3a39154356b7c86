//! Settings loading: an optional TOML file with `AZURE_*` environment
//! variable overrides, so the console runs from a config file, a `.env`-style
//! environment, or a mix of both.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use dns_console_provider::AzureConfig;

/// Config file read when `DNS_CONSOLE_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Full application settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Credentials and zone coordinates.
    pub azure: AzureConfig,
}

impl Settings {
    /// Load settings from the TOML file (if present), then apply environment
    /// overrides. Completeness of the Azure section is checked separately by
    /// the core config validator.
    pub fn load() -> anyhow::Result<Self> {
        let path =
            env::var("DNS_CONSOLE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut settings = if Path::new(&path).exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {path}"))?;
            toml::from_str(&raw).with_context(|| format!("failed to parse config file {path}"))?
        } else {
            Self::default()
        };
        settings.apply_env_overrides();
        Ok(settings)
    }

    fn apply_env_overrides(&mut self) {
        override_from_env(&mut self.azure.tenant_id, "AZURE_TENANT_ID");
        override_from_env(&mut self.azure.client_id, "AZURE_CLIENT_ID");
        override_from_env(&mut self.azure.client_secret, "AZURE_CLIENT_SECRET");
        override_from_env(&mut self.azure.subscription_id, "AZURE_SUBSCRIPTION_ID");
        override_from_env(&mut self.azure.resource_group, "AZURE_RESOURCE_GROUP");
        override_from_env(&mut self.azure.dns_zone, "AZURE_DNS_ZONE");

        override_from_env(&mut self.server.host, "DNS_CONSOLE_HOST");
        if let Ok(port) = env::var("DNS_CONSOLE_PORT")
            && let Ok(port) = port.parse::<u16>()
        {
            self.server.port = port;
        }
    }
}

fn override_from_env(field: &mut String, var: &str) {
    if let Ok(value) = env::var(var)
        && !value.trim().is_empty()
    {
        *field = value;
    }
}
