//! Configuration management for sgsync.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fastly's published list of edge network address ranges
pub const DEFAULT_SOURCE_URL: &str = "https://api.fastly.com/public-ip-list";

/// Environment override for the target security group
const ENV_SECURITY_GROUP_ID: &str = "SGSYNC_SECURITY_GROUP_ID";
/// Environment override for the apply flag ("true"/"1" enables mutation)
const ENV_APPLY: &str = "SGSYNC_APPLY";
/// Environment override for the source API token
const ENV_API_TOKEN: &str = "FASTLY_API_TOKEN";

/// Secure string type that zeroizes memory on drop
/// Used for the source API token
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Security group whose ingress rules mirror the source list
    pub security_group_id: String,

    /// When false, runs report-only: the plan is computed and logged but
    /// no authorize/revoke call is issued
    pub apply: bool,

    /// Authoritative CIDR source
    pub source: SourceConfig,
}

/// Source endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Endpoint publishing the authoritative IP list
    pub url: String,

    /// Optional API token sent as `Fastly-Key`. The public IP list does
    /// not require one; absence is never an error.
    pub api_token: Option<SecureString>,

    /// Also mirror the published IPv6 ranges
    pub include_ipv6: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            security_group_id: String::new(),
            apply: false,
            source: SourceConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            api_token: None,
            include_ipv6: false,
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        Ok(config)
    }

    /// Load configuration from YAML file, falling back to defaults when the
    /// file does not exist, then apply environment overrides and validate.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = if path.as_ref().exists() {
            Self::load(path)?
        } else {
            Self::default()
        };

        config.overlay(
            env::var(ENV_SECURITY_GROUP_ID).ok(),
            env::var(ENV_APPLY).ok(),
            env::var(ENV_API_TOKEN).ok(),
        );
        config.validate()?;

        Ok(config)
    }

    /// Apply overrides on top of the file-based configuration.
    fn overlay(
        &mut self,
        security_group_id: Option<String>,
        apply: Option<String>,
        api_token: Option<String>,
    ) {
        if let Some(group_id) = security_group_id {
            self.security_group_id = group_id;
        }
        if let Some(apply) = apply {
            self.apply = matches!(apply.as_str(), "true" | "1");
        }
        if let Some(token) = api_token {
            self.source.api_token = Some(SecureString::new(token));
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.security_group_id.is_empty() {
            anyhow::bail!(
                "No security group configured. Set security_group_id in the \
                 config file or the {} environment variable",
                ENV_SECURITY_GROUP_ID
            );
        }

        if !self.source.url.starts_with("https://") {
            anyhow::bail!("Source URL must use HTTPS: {}", self.source.url);
        }

        Ok(())
    }
}
