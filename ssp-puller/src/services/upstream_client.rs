//! Upstream JSON API client
//!
//! Certificate verification is off unless `verify_tls` is set, matching the
//! historical behaviour of the harvester.

use crate::error::PullerResult;
use std::time::Duration;

const USER_AGENT: &str = concat!("sspuller/", env!("CARGO_PKG_VERSION"));

/// Scheme and host of the upstream API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    pub schema: String,
    pub host: String,
}

impl ApiEndpoint {
    pub fn new(schema: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            host: host.into(),
        }
    }

    /// `{schema}://{host}`, without trailing slash
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.schema, self.host.trim_end_matches('/'))
    }
}

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub timeout: Duration,
    pub verify_tls: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            verify_tls: false,
        }
    }
}

/// Thin wrapper around a configured `reqwest::Client`
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http_client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(settings: &ClientSettings) -> PullerResult<Self> {
        if !settings.verify_tls {
            tracing::debug!("TLS certificate verification disabled");
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(!settings.verify_tls)
            .build()?;

        Ok(Self { http_client })
    }

    /// Issue a GET. Status handling is left to the caller.
    pub async fn get(&self, url: &str) -> PullerResult<reqwest::Response> {
        tracing::debug!(url = %url, "GET");
        Ok(self.http_client.get(url).send().await?)
    }
}
