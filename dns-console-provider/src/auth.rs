//! Service-principal (client-credentials) token acquisition.
//!
//! One token is shared process-wide. The cache sits behind a
//! `tokio::sync::Mutex` that is held across the refresh call, so concurrent
//! requests that find the token stale trigger exactly one fetch against the
//! token endpoint; the rest wait and reuse the result.

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::{ProviderError, Result};
use crate::http::{DEFAULT_MAX_RETRIES, execute_request_with_retry};

/// Token endpoint base.
const AAD_BASE: &str = "https://login.microsoftonline.com";
/// OAuth scope covering the management API.
const ARM_SCOPE: &str = "https://management.azure.com/.default";
/// Refresh this long before the token actually expires.
const EXPIRY_SKEW_SECS: i64 = 120;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// AAD error body: `{"error": "invalid_client", "error_description": "..."}`.
#[derive(Default, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + TimeDelta::seconds(EXPIRY_SKEW_SECS) < self.expires_at
    }
}

/// Client-credentials token source for one service principal.
pub struct TokenCredential {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCredential {
    /// Create a token source for the given tenant and client.
    #[must_use]
    pub fn new(client: Client, tenant_id: &str, client_id: String, client_secret: String) -> Self {
        Self {
            client,
            token_url: format!(
                "{AAD_BASE}/{}/oauth2/v2.0/token",
                urlencoding::encode(tenant_id)
            ),
            client_id,
            client_secret,
            cached: Mutex::new(None),
        }
    }

    /// Returns a bearer token, fetching or refreshing when the cached one is
    /// stale.
    pub async fn bearer_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref()
            && token.is_fresh(Utc::now())
        {
            return Ok(token.access_token.clone());
        }

        log::debug!("Fetching management API token");
        let fresh = self.fetch_token().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    async fn fetch_token(&self) -> Result<CachedToken> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", ARM_SCOPE),
        ];
        let request = self.client.post(&self.token_url).form(&params);
        let (status, body) =
            execute_request_with_retry(request, "POST", "oauth2/v2.0/token", DEFAULT_MAX_RETRIES)
                .await?;

        if !(200..300).contains(&status) {
            return Err(map_token_error(status, &body));
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::ParseError {
                detail: format!("token response: {e}"),
            })?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Utc::now() + TimeDelta::seconds(token.expires_in),
        })
    }
}

/// A non-2xx answer from the token endpoint is a credential problem: AAD
/// reports bad client ids, bad secrets, and unknown tenants alike as 400/401.
fn map_token_error(status: u16, body: &str) -> ProviderError {
    let parsed: TokenErrorResponse = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .error_description
        .or(parsed.error)
        .unwrap_or_else(|| format!("HTTP {status}"));
    match status {
        400 | 401 | 403 => ProviderError::InvalidCredentials {
            raw_message: Some(message),
        },
        _ => ProviderError::Unknown {
            raw_code: None,
            raw_message: message,
        },
    }
}
