//! Route construction for Discord API endpoints.
//!
//! A [`Route`] is one logical endpoint call: the HTTP method, the path with
//! every `{placeholder}` substituted, and the rate limit bucket the call
//! belongs to.
//!
//! # Buckets
//!
//! Discord scopes rate limits by the endpoint and its "major parameters"
//! (`channel_id`, `guild_id` and `webhook_id`). Two routes share a bucket
//! when they have the same template and the same major parameter values.
//!
//! # Example
//!
//! ```rust
//! use restcord::clients::{HttpMethod, Route};
//!
//! let route = Route::builder(HttpMethod::Get, "/guilds/{guild_id}/members")
//!     .param("guild_id", 81_384_788_765_712_384_u64)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(route.path(), "/guilds/81384788765712384/members");
//! assert_eq!(route.bucket(), ":81384788765712384::/guilds/{guild_id}/members");
//! ```

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;
use crate::clients::http_request::HttpMethod;

/// Parameters Discord uses to scope rate limit buckets.
const MAJOR_PARAMETERS: [&str; 3] = ["channel_id", "guild_id", "webhook_id"];

/// A value substituted into a route template.
///
/// Numeric ids are rendered in decimal. Text is percent-encoded so that
/// emoji, invite codes and webhook tokens cannot alter the path structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteParam {
    /// A numeric id, rendered in decimal.
    Id(u64),
    /// A text value, percent-encoded on substitution.
    Text(String),
}

impl RouteParam {
    fn render(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Text(text) => urlencoding::encode(text).into_owned(),
        }
    }
}

impl From<u64> for RouteParam {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for RouteParam {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RouteParam {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// One endpoint call against the Discord API.
///
/// Routes are immutable once built. Use [`Route::builder`] to create one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    method: HttpMethod,
    template: String,
    path: String,
    bucket: String,
}

impl Route {
    /// Creates a builder for a route with the given method and template.
    #[must_use]
    pub fn builder(method: HttpMethod, template: impl Into<String>) -> RouteBuilder {
        RouteBuilder {
            method,
            template: template.into(),
            params: Vec::new(),
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the unsubstituted path template.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the path with all placeholders substituted.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the rate limit bucket key.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Returns the full URL for this route under `base_url`.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!("{base_url}{}", self.path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Builder for [`Route`] instances.
#[derive(Debug)]
pub struct RouteBuilder {
    method: HttpMethod,
    template: String,
    params: Vec<(&'static str, RouteParam)>,
}

impl RouteBuilder {
    /// Supplies the value for the `{name}` placeholder.
    ///
    /// Setting the same name twice keeps the last value.
    #[must_use]
    pub fn param(mut self, name: &'static str, value: impl Into<RouteParam>) -> Self {
        let value = value.into();
        match self.params.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.params.push((name, value)),
        }
        self
    }

    /// Builds the route, substituting every placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::UnresolvedPlaceholder`] if the
    /// template names a placeholder with no value, or has an unclosed brace.
    pub fn build(self) -> Result<Route, InvalidHttpRequestError> {
        let path = self.interpolate()?;

        let mut bucket = String::new();
        for major in MAJOR_PARAMETERS {
            if let Some(value) = self.lookup(major) {
                bucket.push_str(&value.render());
            }
            bucket.push(':');
        }
        bucket.push_str(&self.template);

        Ok(Route {
            method: self.method,
            template: self.template,
            path,
            bucket,
        })
    }

    fn lookup(&self, name: &str) -> Option<&RouteParam> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    fn interpolate(&self) -> Result<String, InvalidHttpRequestError> {
        let unresolved = |placeholder: &str| InvalidHttpRequestError::UnresolvedPlaceholder {
            template: self.template.clone(),
            placeholder: placeholder.to_string(),
        };

        let mut path = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            path.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| unresolved(after))?;
            let name = &after[..close];
            let value = self.lookup(name).ok_or_else(|| unresolved(name))?;
            path.push_str(&value.render());
            rest = &after[close + 1..];
        }
        path.push_str(rest);

        Ok(path)
    }
}

// Verify Route is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Route>();
};
