//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction so that a
//! [`RestcordConfig`](crate::RestcordConfig) can never hold an empty token or
//! an unusable URL.

use crate::error::ConfigError;
use std::fmt;

/// A validated Discord bot token.
///
/// The token is stored without the `Bot ` scheme prefix; the transport adds
/// it when building the `Authorization` header. Its `Debug` output is masked
/// so the credential never ends up in logs.
///
/// # Example
///
/// ```rust
/// use restcord::BotToken;
///
/// let token = BotToken::new("Bot abc.def.ghi").unwrap();
/// assert_eq!(token.as_ref(), "abc.def.ghi");
/// assert_eq!(token.authorization(), "Bot abc.def.ghi");
/// assert_eq!(format!("{:?}", token), "BotToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    /// Creates a new validated bot token.
    ///
    /// A leading `Bot ` prefix is accepted and stripped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty or only
    /// consists of the prefix and whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        let token = token.trim();
        let token = token
            .strip_prefix("Bot")
            .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
            .unwrap_or(token)
            .trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self(token.to_string()))
    }

    /// Returns the value of the `Authorization` header for this token.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bot {}", self.0)
    }
}

impl AsRef<str> for BotToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(*****)")
    }
}

/// A validated absolute http(s) URL, used for the API base URL and proxies.
///
/// Trailing slashes are removed so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use restcord::ApiUrl;
///
/// let url = ApiUrl::new("http://localhost:8080/api/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8080/api");
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "localhost");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ApiUrl {
    /// Creates a new validated URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL has no `http`/`https`
    /// scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        // Host ends at port, path, query or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
