use crate::errors::IpLocateError;
use crate::response::LookupResponse;
use crate::types::{Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::utils::{encode_ip, is_valid_ip, send_request};
use reqwest::{Client, Url};
use std::sync::Arc;
use std::time::Duration;

/// Client for the IPLocate geolocation and threat intelligence API.
///
/// Cheap to clone; clones share the same configuration and connection pool.
#[derive(Clone)]
pub struct IpLocate {
    api_key: String,
    config: Arc<Config>,
    client: Client,
}

impl IpLocate {
    pub fn new(api_key: &str, config: Option<Config>) -> Result<Self, IpLocateError> {
        if api_key.is_empty() {
            return Err(IpLocateError::Config("API key is required".into()));
        }

        let mut config = config.unwrap_or_default();
        config.base_url = normalize_base_url(&config.base_url);
        if config.timeout.is_zero() {
            config.timeout = DEFAULT_TIMEOUT;
        }
        Url::parse(&config.base_url).map_err(|e| {
            IpLocateError::Config(format!("Invalid base URL {}: {e}", config.base_url))
        })?;

        let client = config
            .http_client_options
            .client
            .clone()
            .unwrap_or_default();

        Ok(Self {
            api_key: api_key.to_string(),
            config: Arc::new(config),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Looks up geolocation and threat data for `ip`.
    ///
    /// Malformed addresses fail with [`IpLocateError::InvalidIp`] before any
    /// request is made.
    pub async fn lookup(&self, ip: &str) -> Result<LookupResponse, IpLocateError> {
        if !is_valid_ip(ip) {
            return Err(IpLocateError::invalid_ip(ip));
        }
        let path = format!("/lookup/{}", encode_ip(ip));
        send_request(&self.client, &self.config, &self.api_key, &path).await
    }

    /// Looks up the address the request originates from.
    pub async fn lookup_self(&self) -> Result<LookupResponse, IpLocateError> {
        send_request(&self.client, &self.config, &self.api_key, "/lookup/").await
    }
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.strip_suffix('/').unwrap_or(base_url);
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
