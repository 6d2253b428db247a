//! HTTP response types for the restcord client.
//!
//! This module provides the decoded [`ResponseBody`], the rate limit
//! information Discord sends in response headers ([`RateLimitHeaders`]), and
//! [`HttpResponse`], which bundles both with the status of one exchange.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A decoded response body.
///
/// Bodies served as `application/json` are parsed; anything else (or JSON
/// that fails to parse) is kept as raw text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseBody {
    /// A parsed JSON document.
    Json(Value),
    /// The raw body text.
    Text(String),
}

impl ResponseBody {
    /// Decodes a body according to its `Content-Type`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use restcord::clients::ResponseBody;
    /// use serde_json::json;
    ///
    /// let body = ResponseBody::decode(Some("application/json"), r#"{"id":"1"}"#.to_string());
    /// assert_eq!(body, ResponseBody::Json(json!({"id": "1"})));
    ///
    /// let body = ResponseBody::decode(Some("text/html"), "<h1>502</h1>".to_string());
    /// assert_eq!(body, ResponseBody::Text("<h1>502</h1>".to_string()));
    /// ```
    #[must_use]
    pub fn decode(content_type: Option<&str>, text: String) -> Self {
        let is_json = content_type.is_some_and(|value| {
            value
                .split(';')
                .next()
                .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        });

        if is_json {
            if let Ok(json) = serde_json::from_str(&text) {
                return Self::Json(json);
            }
        }
        Self::Text(text)
    }

    /// Returns the JSON document, if the body was JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(json) => Some(json),
            Self::Text(_) => None,
        }
    }

    /// Converts the body into a JSON value; text becomes a JSON string.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(json) => json,
            Self::Text(text) => Value::String(text),
        }
    }

    /// Deserializes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        match self {
            Self::Json(json) => serde_json::from_value(json),
            Self::Text(text) => serde_json::from_str(&text),
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(json) => write!(f, "{json}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Rate limit information parsed from Discord's response headers.
///
/// # Example
///
/// ```rust
/// use restcord::clients::RateLimitHeaders;
/// use reqwest::header::HeaderMap;
/// use std::time::{Duration, SystemTime};
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-ratelimit-remaining", "0".parse().unwrap());
/// headers.insert("x-ratelimit-reset-after", "1.5".parse().unwrap());
///
/// let limits = RateLimitHeaders::parse(&headers);
/// assert!(limits.is_exhausted());
/// assert_eq!(limits.reset_delay(SystemTime::now()), Some(Duration::from_millis(1500)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RateLimitHeaders {
    /// Requests left in the current window (`X-RateLimit-Remaining`).
    pub remaining: Option<u32>,
    /// Seconds until the window resets (`X-RateLimit-Reset-After`).
    pub reset_after: Option<f64>,
    /// Epoch seconds at which the window resets (`X-RateLimit-Reset`).
    pub reset: Option<f64>,
    /// Discord's identifier for the bucket (`X-RateLimit-Bucket`).
    pub bucket: Option<String>,
    /// Whether the response carried a `Via` header.
    pub via: bool,
}

impl RateLimitHeaders {
    /// Parses the rate limit headers from a header map.
    #[must_use]
    pub fn parse(headers: &HeaderMap) -> Self {
        let text = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim);

        Self {
            remaining: text("x-ratelimit-remaining").and_then(|v| v.parse().ok()),
            reset_after: text("x-ratelimit-reset-after")
                .and_then(|v| v.parse().ok())
                .filter(|v: &f64| v.is_finite()),
            reset: text("x-ratelimit-reset")
                .and_then(|v| v.parse().ok())
                .filter(|v: &f64| v.is_finite()),
            bucket: text("x-ratelimit-bucket").map(ToString::to_string),
            via: headers.contains_key("via"),
        }
    }

    /// Returns `true` if the bucket has no requests left.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Returns how long until the bucket resets.
    ///
    /// Uses `X-RateLimit-Reset-After` when present, otherwise the absolute
    /// `X-RateLimit-Reset` timestamp minus `now`. Resets in the past yield
    /// a zero delay.
    #[must_use]
    pub fn reset_delay(&self, now: SystemTime) -> Option<Duration> {
        if let Some(after) = self.reset_after {
            return Some(duration_from_secs(after));
        }

        let reset = self.reset?;
        let now = now.duration_since(UNIX_EPOCH).ok()?.as_secs_f64();
        Some(duration_from_secs(reset - now))
    }
}

/// Longest wait accepted from a server-supplied value.
const MAX_WAIT_SECS: f64 = 86_400.0;

/// Converts server-supplied seconds into a `Duration`, clamped to
/// `0..=MAX_WAIT_SECS` so timers cannot overflow.
pub(crate) fn duration_from_secs(secs: f64) -> Duration {
    if secs.is_nan() {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(secs.clamp(0.0, MAX_WAIT_SECS))
}

/// The decoded result of one HTTP exchange.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Rate limit headers from the response.
    pub rate_limit: RateLimitHeaders,
    /// The decoded body.
    pub body: ResponseBody,
}

impl HttpResponse {
    /// Returns `true` for 2xx responses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}
