//! Process configuration read from the environment.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use linkedin_ads_provider::{ApiConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL, HttpClientConfig};

pub const ENV_ACCESS_TOKEN: &str = "LINKEDIN_ACCESS_TOKEN";
pub const ENV_ACCOUNT_ID: &str = "LINKEDIN_ACCOUNT_ID";
pub const ENV_BASE_URL: &str = "LINKEDIN_BASE_URL";
pub const ENV_API_VERSION: &str = "LINKEDIN_API_VERSION";
pub const ENV_MAX_RETRIES: &str = "LINKEDIN_MAX_RETRIES";
pub const ENV_TIMEOUT_SECS: &str = "LINKEDIN_TIMEOUT_SECS";

const BEARER_PREFIX: &str = "Bearer ";

/// Settings of the MCP server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpConfig {
    /// Full `Authorization` header value (`Bearer ...`).
    pub access_token: String,
    /// Account used by `search_campaigns` when the caller names none.
    pub default_account_id: Option<String>,
    pub base_url: String,
    pub api_version: String,
    pub http: HttpClientConfig,
}

impl McpConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let Some(token) = get(ENV_ACCESS_TOKEN) else {
            bail!("{ENV_ACCESS_TOKEN} is required");
        };
        let access_token = if token.starts_with(BEARER_PREFIX) {
            token
        } else {
            format!("{BEARER_PREFIX}{token}")
        };

        let mut http = HttpClientConfig::default();
        if let Some(retries) = get(ENV_MAX_RETRIES) {
            http.max_retries = retries
                .parse()
                .with_context(|| format!("{ENV_MAX_RETRIES} must be a non-negative integer"))?;
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a positive integer"))?;
            if secs == 0 {
                bail!("{ENV_TIMEOUT_SECS} must be a positive integer");
            }
            http.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            access_token,
            default_account_id: get(ENV_ACCOUNT_ID),
            base_url: get(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_version: get(ENV_API_VERSION).unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            http,
        })
    }

    /// Connection settings handed to the query builders.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.access_token.clone())
            .with_base_url(self.base_url.clone())
            .with_version(self.api_version.clone())
    }
}
