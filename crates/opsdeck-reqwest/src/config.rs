//! Configuration for the backend API client.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Default timeout for API requests: 20 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default base URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8787";

/// Configuration for the backend API client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the backend API.
    pub base_url: String,
    /// Shared secret identifying this agent service to the backend.
    pub agent_secret: String,
    /// Per-request timeout ceiling.
    pub timeout: Duration,
    /// User-Agent header to send with requests.
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            agent_secret: String::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: Self::default_user_agent(),
        }
    }
}

impl ApiClientConfig {
    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("opsdeck/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Builds a configuration from `OPSDECK_*` environment variables.
    ///
    /// Unset variables keep their defaults; a malformed timeout value also
    /// falls back to the default rather than failing startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("OPSDECK_API_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(secret) = std::env::var("OPSDECK_AGENT_SECRET") {
            config.agent_secret = secret.trim().to_string();
        }
        if let Ok(seconds) = std::env::var("OPSDECK_API_TIMEOUT_SECONDS") {
            if let Ok(seconds) = seconds.parse::<u64>() {
                config.timeout = Duration::from_secs(seconds);
            }
        }

        config
    }

    /// Creates a new configuration with the specified base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Creates a new configuration with the specified agent secret.
    pub fn with_agent_secret(mut self, secret: impl Into<String>) -> Self {
        self.agent_secret = secret.into();
        self
    }

    /// Creates a new configuration with the specified timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates a new configuration with the specified user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }

    /// Returns the effective user agent, using default if empty.
    pub fn effective_user_agent(&self) -> String {
        if self.user_agent.is_empty() {
            Self::default_user_agent()
        } else {
            self.user_agent.clone()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url).map_err(|e| Error::Config(e.to_string()))?;
        Ok(())
    }
}
