//! Authoritative CIDR source: the Fastly public IP list.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{SecureString, SourceConfig};
use crate::error::SgsyncError;

const TIMEOUT_SECS: u64 = 30;
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 2000;

/// Provider of the authoritative CIDR list the security group must mirror.
#[async_trait]
pub trait CidrSource: Send + Sync {
    /// Produce the current authoritative CIDR list, in published order.
    async fn cidrs(&self) -> Result<Vec<String>, SgsyncError>;
}

/// HTTP client for the Fastly `public-ip-list` endpoint
pub struct FastlySource {
    client: Client,
    url: String,
    api_token: Option<SecureString>,
    include_ipv6: bool,
}

impl FastlySource {
    /// Create a new source from the configured endpoint settings
    pub fn new(config: &SourceConfig) -> Result<Self, SgsyncError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(format!("sgsync/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SgsyncError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_token: config.api_token.clone(),
            include_ipv6: config.include_ipv6,
        })
    }

    /// Fetch the list body with retry logic
    async fn fetch_with_retry(&self) -> Result<String, SgsyncError> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = RETRY_DELAY_MS * (1 << (attempt - 1));
                debug!("Retry {} after {}ms for {}", attempt, delay, self.url);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            let mut request = self.client.get(&self.url);
            if let Some(ref token) = self.api_token {
                // The endpoint is public; the token only raises rate limits
                if !token.is_empty() {
                    request = request.header("Fastly-Key", token.as_str());
                }
            }

            match request.send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return response
                            .text()
                            .await
                            .map_err(|e| SgsyncError::Source(e.to_string()));
                    }
                    last_error = Some(SgsyncError::Source(format!(
                        "HTTP {} from {}",
                        response.status(),
                        self.url
                    )));
                }
                Err(e) => {
                    last_error = Some(SgsyncError::Source(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| SgsyncError::Source("unknown error".to_string())))
    }
}

#[async_trait]
impl CidrSource for FastlySource {
    async fn cidrs(&self) -> Result<Vec<String>, SgsyncError> {
        let body = self.fetch_with_retry().await?;
        let cidrs = parse_public_ip_list(&body, self.include_ipv6)?;
        info!("Fetched {} CIDRs from {}", cidrs.len(), self.url);
        Ok(cidrs)
    }
}

#[derive(Deserialize)]
struct PublicIpList {
    addresses: Vec<String>,
    #[serde(default)]
    ipv6_addresses: Vec<String>,
}

/// Parse a `public-ip-list` JSON body.
///
/// Entries are kept verbatim in published order, IPv4 first. CIDRs stay
/// opaque tokens here; the security group API is the validator.
pub fn parse_public_ip_list(body: &str, include_ipv6: bool) -> Result<Vec<String>, SgsyncError> {
    let list: PublicIpList = serde_json::from_str(body)
        .map_err(|e| SgsyncError::Source(format!("Malformed IP list response: {}", e)))?;

    let mut cidrs = list.addresses;
    if include_ipv6 {
        cidrs.extend(list.ipv6_addresses);
    }

    Ok(cidrs)
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Source returning a fixed list
    pub struct StaticSource {
        pub cidrs: Vec<String>,
    }

    impl StaticSource {
        pub fn new(cidrs: &[&str]) -> Self {
            Self {
                cidrs: cidrs.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl CidrSource for StaticSource {
        async fn cidrs(&self) -> Result<Vec<String>, SgsyncError> {
            Ok(self.cidrs.clone())
        }
    }

    /// Source that always fails
    pub struct FailingSource;

    #[async_trait]
    impl CidrSource for FailingSource {
        async fn cidrs(&self) -> Result<Vec<String>, SgsyncError> {
            Err(SgsyncError::Source("list unavailable".to_string()))
        }
    }
}
