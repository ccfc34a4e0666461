//! Client configuration
//!
//! A [`ClientConfig`] is built once and owned by a single client. It can be
//! assembled in code with the builder, read from the environment, or loaded
//! from a YAML file:
//!
//! ```yaml
//! endpoint: https://api.huntress.io
//! page_size: 100
//! client_id: hk_abc
//! client_secret: hs_def
//! termination: token_present
//! rate_limit:
//!   limit: 60
//!   period: 60
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, Termination};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.huntress.io";

/// Default User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str =
    concat!("Huntress Rust API wrapper ", env!("CARGO_PKG_VERSION"));

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "HUNTRESS_API_KEY";

/// Environment variable holding the API secret
pub const ENV_API_SECRET: &str = "HUNTRESS_API_SECRET";

/// Environment variable overriding the endpoint
pub const ENV_ENDPOINT: &str = "HUNTRESS_ENDPOINT";

// ============================================================================
// Client Config
// ============================================================================

/// Configuration for a Huntress client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the API
    pub endpoint: String,

    /// User-Agent header value
    pub user_agent: String,

    /// Records requested per page
    pub page_size: u32,

    /// API key (sent as the basic auth username)
    pub client_id: Option<String>,

    /// API secret (sent as the basic auth password)
    pub client_secret: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum number of retries for transient failures
    pub max_retries: u32,

    /// Backoff strategy between retries
    pub backoff: BackoffType,

    /// Client-side rate limit; `None` disables it
    pub rate_limit: Option<RateLimiterConfig>,

    /// When collection traversal stops
    pub termination: Termination,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            client_id: None,
            client_secret: None,
            timeout_secs: 30,
            max_retries: 3,
            backoff: BackoffType::Exponential,
            rate_limit: Some(RateLimiterConfig::default()),
            termination: Termination::TokenPresent,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Defaults overlaid with `HUNTRESS_API_KEY`, `HUNTRESS_API_SECRET`
    /// and `HUNTRESS_ENDPOINT`
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Overlay environment variables that are set and non-empty
    #[must_use]
    pub fn with_env(mut self) -> Self {
        if let Some(key) = env_var(ENV_API_KEY) {
            self.client_id = Some(key);
        }
        if let Some(secret) = env_var(ENV_API_SECRET) {
            self.client_secret = Some(secret);
        }
        if let Some(endpoint) = env_var(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        self
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check values that would otherwise fail at request time
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::invalid_value(
                "page_size",
                "must be a positive integer",
            ));
        }

        let url = url::Url::parse(&self.endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Derive the transport configuration
    pub fn http_config(&self) -> HttpClientConfig {
        let defaults = HttpClientConfig::default();
        HttpClientConfig {
            base_url: Some(self.endpoint.clone()),
            timeout: self.timeout(),
            max_retries: self.max_retries,
            backoff_type: self.backoff,
            rate_limit: self.rate_limit.clone(),
            user_agent: self.user_agent.clone(),
            ..defaults
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ClientConfig`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the User-Agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the page size
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Set API key and secret
    pub fn credentials(mut self, client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.config.client_id = Some(client_id.into());
        self.config.client_secret = Some(secret.into());
        self
    }

    /// Set the API key
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.config.client_id = Some(client_id.into());
        self
    }

    /// Set the API secret
    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.client_secret = Some(secret.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs();
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the backoff strategy
    pub fn backoff(mut self, backoff: BackoffType) -> Self {
        self.config.backoff = backoff;
        self
    }

    /// Set the rate limit
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable client-side rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Set the termination rule
    pub fn termination(mut self, termination: Termination) -> Self {
        self.config.termination = termination;
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
