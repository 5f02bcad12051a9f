//! Configuration for the Trello client

use crate::http::{DEFAULT_TIMEOUT, ReqwestTransport};
use secrecy::SecretString;
use std::time::Duration;
use trellis_core::retry::{BackoffError, RandomWindowBackoff};

/// Configuration for the Trello client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Trello API key
    pub api_key: Option<SecretString>,

    /// Trello user token
    pub token: Option<SecretString>,

    /// Base URL for the API
    pub base_url: Option<String>,

    /// Timeout for a single HTTP attempt
    pub timeout: Duration,

    /// Custom `User-Agent` header
    pub user_agent: Option<String>,

    /// HTTP proxy URL
    pub proxy: Option<String>,

    /// How HTTP 429 answers are retried
    pub rate_limit: RateLimitConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            token: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            proxy: None,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with a key/token pair.
    pub fn with_credentials(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::new(api_key.into().into_boxed_str())),
            token: Some(SecretString::new(token.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    /// This will look for:
    /// - `TRELLO_API_KEY` and `TRELLO_TOKEN` for authentication
    /// - `TRELLO_BASE_URL` for the API base URL
    /// - `TRELLO_TIMEOUT` for the per-attempt timeout (in seconds)
    /// - `TRELLO_PROXY` for HTTP proxy
    /// - `TRELLO_MAX_ATTEMPTS` for a ceiling on rate-limited attempts
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(api_key) = env::var("TRELLO_API_KEY") {
            config.api_key = Some(SecretString::new(api_key.into_boxed_str()));
        }
        if let Ok(token) = env::var("TRELLO_TOKEN") {
            config.token = Some(SecretString::new(token.into_boxed_str()));
        }

        if let Ok(base_url) = env::var("TRELLO_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(timeout_str) = env::var("TRELLO_TIMEOUT") {
            let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
                crate::error::Error::InvalidArgument(format!(
                    "TRELLO_TIMEOUT must be a number of seconds, got '{timeout_str}'"
                ))
            })?;
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(proxy) = env::var("TRELLO_PROXY") {
            config.proxy = Some(proxy);
        }

        if let Ok(max_str) = env::var("TRELLO_MAX_ATTEMPTS") {
            let max_attempts = max_str.parse::<u32>().map_err(|_| {
                crate::error::Error::InvalidArgument(format!(
                    "TRELLO_MAX_ATTEMPTS must be a positive integer, got '{max_str}'"
                ))
            })?;
            config.rate_limit.max_attempts = Some(max_attempts);
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    ///
    /// Values in `other` that are unset or equal to the defaults do not
    /// override this configuration.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.timeout != DEFAULT_TIMEOUT {
            self.timeout = other.timeout;
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent;
        }
        if other.proxy.is_some() {
            self.proxy = other.proxy;
        }
        if other.rate_limit != RateLimitConfig::default() {
            self.rate_limit = other.rate_limit;
        }

        self
    }

    /// Build the default transport described by this configuration.
    pub(crate) fn build_transport(&self) -> crate::error::Result<ReqwestTransport> {
        let mut builder = ReqwestTransport::builder().timeout(self.timeout);
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(proxy) = &self.proxy {
            builder = builder.proxy(proxy.clone());
        }
        builder.build()
    }
}

/// Configuration for rate-limit retries.
///
/// Every HTTP 429 is followed by a uniformly random wait in
/// `[min_delay, max_delay)` and a new attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Inclusive lower bound of the wait
    pub min_delay: Duration,

    /// Exclusive upper bound of the wait
    pub max_delay: Duration,

    /// Ceiling on attempts; `None` retries for as long as 429s keep coming
    pub max_attempts: Option<u32>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        let backoff = RandomWindowBackoff::default();
        Self {
            min_delay: backoff.min_delay(),
            max_delay: backoff.max_delay(),
            max_attempts: None,
        }
    }
}

impl RateLimitConfig {
    /// Create the backoff strategy described by this config.
    pub fn to_backoff(&self) -> Result<RandomWindowBackoff, BackoffError> {
        RandomWindowBackoff::builder()
            .min_delay(self.min_delay)
            .max_delay(self.max_delay)
            .max_attempts_opt(self.max_attempts)
            .build()
    }
}
