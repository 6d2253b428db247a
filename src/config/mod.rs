//! Configuration types for the restcord client.
//!
//! # Overview
//!
//! - [`RestcordConfig`]: All settings needed to talk to the Discord API
//! - [`RestcordConfigBuilder`]: A builder for constructing [`RestcordConfig`] instances
//! - [`RetryPolicy`]: Attempt cap and backoff used for rate limits and server errors
//! - [`ProxyAuth`]: Basic credentials for an outbound proxy
//! - [`BotToken`]: A validated bot token with masked debug output
//! - [`ApiUrl`]: A validated absolute URL
//!
//! # Example
//!
//! ```rust
//! use restcord::{BotToken, RestcordConfig, RetryPolicy};
//!
//! let config = RestcordConfig::builder()
//!     .token(BotToken::new("my-bot-token").unwrap())
//!     .retry(RetryPolicy::default())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://discord.com/api");
//! ```

mod newtypes;

pub use newtypes::{ApiUrl, BotToken};

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// The Discord REST API base URL.
pub const DEFAULT_BASE_URL: &str = "https://discord.com/api";

/// Attempt cap and backoff schedule for retried requests.
///
/// Rate limited (429) responses and transient server errors (500, 502) are
/// retried until `max_attempts` exchanges have been made. Server errors wait
/// `base_delay + attempt * step_delay` between attempts; rate limits wait for
/// the duration the API asks for.
///
/// # Example
///
/// ```rust
/// use restcord::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 5);
/// assert_eq!(policy.server_error_delay(0), Duration::from_secs(1));
/// assert_eq!(policy.server_error_delay(2), Duration::from_secs(5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of exchanges attempted for one request.
    pub max_attempts: u32,
    /// Delay before the first server error retry.
    pub base_delay: Duration,
    /// Extra delay added for every further attempt.
    pub step_delay: Duration,
}

impl RetryPolicy {
    /// Returns the wait before retrying after a server error on the
    /// zero-based `attempt`.
    #[must_use]
    pub fn server_error_delay(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_add(self.step_delay.saturating_mul(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            step_delay: Duration::from_secs(2),
        }
    }
}

/// Basic credentials for an authenticating proxy.
///
/// The password is masked in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyAuth {
    /// The proxy user name.
    pub username: String,
    /// The proxy password.
    pub password: String,
}

impl ProxyAuth {
    /// Creates proxy credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for ProxyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyAuth")
            .field("username", &self.username)
            .field("password", &"*****")
            .finish()
    }
}

/// Configuration for a restcord client.
///
/// # Thread Safety
///
/// `RestcordConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use restcord::{ApiUrl, BotToken, ProxyAuth, RestcordConfig};
///
/// let config = RestcordConfig::builder()
///     .token(BotToken::new("my-bot-token").unwrap())
///     .proxy(ApiUrl::new("http://127.0.0.1:3128").unwrap())
///     .proxy_auth(ProxyAuth::new("user", "pass"))
///     .user_agent_prefix("MyBot/1.0")
///     .build()
///     .unwrap();
///
/// assert!(config.proxy().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct RestcordConfig {
    token: BotToken,
    base_url: ApiUrl,
    proxy: Option<ApiUrl>,
    proxy_auth: Option<ProxyAuth>,
    user_agent_prefix: Option<String>,
    retry: RetryPolicy,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl RestcordConfig {
    /// Creates a new builder for constructing a `RestcordConfig`.
    #[must_use]
    pub fn builder() -> RestcordConfigBuilder {
        RestcordConfigBuilder::new()
    }

    /// Returns the bot token.
    #[must_use]
    pub const fn token(&self) -> &BotToken {
        &self.token
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    /// Returns the outbound proxy, if configured.
    #[must_use]
    pub const fn proxy(&self) -> Option<&ApiUrl> {
        self.proxy.as_ref()
    }

    /// Returns the proxy credentials, if configured.
    #[must_use]
    pub const fn proxy_auth(&self) -> Option<&ProxyAuth> {
        self.proxy_auth.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the externally supplied HTTP client, if any.
    #[must_use]
    pub const fn http_client(&self) -> Option<&reqwest::Client> {
        self.http_client.as_ref()
    }
}

// Verify RestcordConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestcordConfig>();
};

/// Builder for constructing [`RestcordConfig`] instances.
///
/// Only `token` is required.
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `retry`: [`RetryPolicy::default`] (5 attempts, 1s + 2s per attempt)
/// - `proxy`, `proxy_auth`, `user_agent_prefix`, `timeout`: `None`
/// - `http_client`: `None` (a client is created on first request)
#[derive(Debug, Default)]
pub struct RestcordConfigBuilder {
    token: Option<BotToken>,
    base_url: Option<ApiUrl>,
    proxy: Option<ApiUrl>,
    proxy_auth: Option<ProxyAuth>,
    user_agent_prefix: Option<String>,
    retry: Option<RetryPolicy>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl RestcordConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bot token (required).
    #[must_use]
    pub fn token(mut self, token: BotToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: ApiUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Routes all requests through a proxy.
    ///
    /// Ignored when an external HTTP client is supplied.
    #[must_use]
    pub fn proxy(mut self, url: ApiUrl) -> Self {
        self.proxy = Some(url);
        self
    }

    /// Sets basic credentials for the proxy.
    #[must_use]
    pub fn proxy_auth(mut self, auth: ProxyAuth) -> Self {
        self.proxy_auth = Some(auth);
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Sets a timeout applied to every HTTP exchange.
    ///
    /// Ignored when an external HTTP client is supplied.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Supplies an existing `reqwest::Client` to share its connection pool.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`RestcordConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `token` is not set,
    /// [`ConfigError::InvalidRetryPolicy`] if `max_attempts` is zero, and
    /// [`ConfigError::MissingRequiredField`] for `proxy` when proxy
    /// credentials are given without a proxy.
    pub fn build(self) -> Result<RestcordConfig, ConfigError> {
        let token = self
            .token
            .ok_or(ConfigError::MissingRequiredField { field: "token" })?;

        let retry = self.retry.unwrap_or_default();
        if retry.max_attempts == 0 {
            return Err(ConfigError::InvalidRetryPolicy {
                reason: "max_attempts must be at least 1".to_string(),
            });
        }

        if self.proxy_auth.is_some() && self.proxy.is_none() {
            return Err(ConfigError::MissingRequiredField { field: "proxy" });
        }

        let base_url = match self.base_url {
            Some(url) => url,
            None => ApiUrl::new(DEFAULT_BASE_URL)?,
        };

        Ok(RestcordConfig {
            token,
            base_url,
            proxy: self.proxy,
            proxy_auth: self.proxy_auth,
            user_agent_prefix: self.user_agent_prefix,
            retry,
            timeout: self.timeout,
            http_client: self.http_client,
        })
    }
}
