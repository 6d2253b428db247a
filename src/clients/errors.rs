//! HTTP error taxonomy for the restcord client.
//!
//! Every failed request surfaces as an [`HttpError`]. Responses with a
//! non-2xx status map to one variant per status a caller can act on:
//!
//! | Status | Variant |
//! |--------|---------|
//! | 400 | [`HttpError::BadRequest`] |
//! | 403 | [`HttpError::Forbidden`] |
//! | 404 | [`HttpError::NotFound`] |
//! | 429 | [`HttpError::RateLimited`] |
//! | 500 | [`HttpError::InternalServerError`] |
//! | 502 | [`HttpError::BadGateway`] |
//! | other | [`HttpError::Http`] |
//!
//! Each carries an [`HttpResponseError`] with the status, the Discord error
//! code, the message and the flattened field validation errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use restcord::HttpError;
//!
//! match client.users().get_user(user_id).await {
//!     Ok(user) => println!("Found {}", user.username),
//!     Err(HttpError::NotFound(e)) => println!("No such user: {}", e.message),
//!     Err(HttpError::RateLimited(e)) => println!("Retry in {:.2}s", e.retry_after),
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::clients::http_response::ResponseBody;

/// A non-successful response from the Discord API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The Discord-specific error code, or `0` if the body had none.
    pub code: i64,
    /// The error message from the body, or the raw body text.
    pub message: String,
    /// Field validation failures keyed by dotted field path.
    pub errors: BTreeMap<String, String>,
}

impl HttpResponseError {
    /// Builds the error from a status code and a decoded response body.
    ///
    /// # Example
    ///
    /// ```rust
    /// use restcord::clients::{HttpResponseError, ResponseBody};
    /// use serde_json::json;
    ///
    /// let body = ResponseBody::Json(json!({
    ///     "code": 50035,
    ///     "message": "Invalid Form Body",
    ///     "errors": {"username": {"_errors": [{"message": "too short"}]}}
    /// }));
    /// let error = HttpResponseError::new(400, &body);
    ///
    /// assert_eq!(error.code, 50035);
    /// assert_eq!(error.errors["username"], "too short");
    /// ```
    #[must_use]
    pub fn new(status: u16, body: &ResponseBody) -> Self {
        match body {
            ResponseBody::Json(Value::Object(map)) => Self {
                status,
                code: map.get("code").and_then(Value::as_i64).unwrap_or(0),
                message: map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                errors: map.get("errors").map(flatten_errors).unwrap_or_default(),
            },
            ResponseBody::Json(other) => Self {
                status,
                code: 0,
                message: other.to_string(),
                errors: BTreeMap::new(),
            },
            ResponseBody::Text(text) => Self {
                status,
                code: 0,
                message: text.clone(),
                errors: BTreeMap::new(),
            },
        }
    }

    /// Returns the message followed by one `In <field>: <reason>` line per
    /// field error.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = self.message.clone();
        for (field, reason) in &self.errors {
            text.push_str(&format!("\nIn {field}: {reason}"));
        }
        text
    }
}

impl fmt::Display for HttpResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown");
        write!(f, "{} {} (error code: {})", self.status, reason, self.code)?;
        let text = self.text();
        if !text.is_empty() {
            write!(f, ": {text}")?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpResponseError {}

/// A 429 response, with the wait the API asked for.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{response}")]
pub struct RateLimitedError {
    /// The underlying response error.
    pub response: HttpResponseError,
    /// Seconds to wait before retrying.
    pub retry_after: f64,
    /// Whether the limit applies to every route rather than one bucket.
    pub global: bool,
}

impl RateLimitedError {
    /// Parses a 429 body of the form `{"retry_after": <ms>, "global": <bool>}`.
    ///
    /// Returns `None` when the body lacks a numeric `retry_after`.
    #[must_use]
    pub fn from_body(body: &ResponseBody) -> Option<Self> {
        let ResponseBody::Json(json) = body else {
            return None;
        };
        let retry_after_ms = json.get("retry_after").and_then(Value::as_f64)?;
        if !retry_after_ms.is_finite() || retry_after_ms < 0.0 {
            return None;
        }
        Some(Self {
            response: HttpResponseError::new(429, body),
            retry_after: retry_after_ms / 1000.0,
            global: json.get("global").and_then(Value::as_bool).unwrap_or(false),
        })
    }
}

/// Error returned when a request is rejected before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A route template placeholder had no substitution value.
    #[error("Route '{template}' has no value for placeholder '{{{placeholder}}}'.")]
    UnresolvedPlaceholder {
        /// The route template.
        template: String,
        /// The placeholder name without braces.
        placeholder: String,
    },

    /// A required argument was empty or zero.
    #[error("Argument cannot be None: {name}")]
    MissingArgument {
        /// The argument name.
        name: &'static str,
    },

    /// An argument was present but outside the accepted range.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// The argument name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The JSON payload could not be serialized.
    #[error("Cannot serialize request body: {reason}")]
    InvalidBody {
        /// The serializer's error message.
        reason: String,
    },
}

/// Unified error type for every restcord operation.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The API rejected the request as malformed (HTTP 400).
    #[error("Bad request: {0}")]
    BadRequest(HttpResponseError),

    /// The bot lacks permission for the request (HTTP 403).
    #[error("Forbidden: {0}")]
    Forbidden(HttpResponseError),

    /// The resource does not exist (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(HttpResponseError),

    /// The request was rate limited and retries were exhausted (HTTP 429).
    #[error("Rate limited: {0}")]
    RateLimited(RateLimitedError),

    /// The API failed internally and retries were exhausted (HTTP 500).
    #[error("Internal server error: {0}")]
    InternalServerError(HttpResponseError),

    /// The API gateway failed and retries were exhausted (HTTP 502).
    #[error("Bad gateway: {0}")]
    BadGateway(HttpResponseError),

    /// Any other non-successful status.
    #[error("HTTP error: {0}")]
    Http(HttpResponseError),

    /// A 429 response without the framing Discord's API servers produce.
    #[error("Malformed rate limit response ({reason}): {body}")]
    MalformedRateLimit {
        /// What was missing from the response.
        reason: &'static str,
        /// The raw response body.
        body: String,
    },

    /// The request failed validation before it was sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A successful body did not match the expected model.
    #[error("Cannot decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Maps a non-successful status and its body to the matching variant.
    ///
    /// A 429 whose body lacks `retry_after` becomes
    /// [`HttpError::MalformedRateLimit`].
    #[must_use]
    pub fn from_response(status: u16, body: &ResponseBody) -> Self {
        match status {
            400 => Self::BadRequest(HttpResponseError::new(status, body)),
            403 => Self::Forbidden(HttpResponseError::new(status, body)),
            404 => Self::NotFound(HttpResponseError::new(status, body)),
            429 => RateLimitedError::from_body(body).map_or_else(
                || Self::MalformedRateLimit {
                    reason: "missing retry_after",
                    body: body.to_string(),
                },
                Self::RateLimited,
            ),
            500 => Self::InternalServerError(HttpResponseError::new(status, body)),
            502 => Self::BadGateway(HttpResponseError::new(status, body)),
            _ => Self::Http(HttpResponseError::new(status, body)),
        }
    }

    /// Returns the response error for variants produced by an API response.
    #[must_use]
    pub const fn response(&self) -> Option<&HttpResponseError> {
        match self {
            Self::BadRequest(e)
            | Self::Forbidden(e)
            | Self::NotFound(e)
            | Self::InternalServerError(e)
            | Self::BadGateway(e)
            | Self::Http(e) => Some(e),
            Self::RateLimited(e) => Some(&e.response),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(|e| e.status)
    }
}

/// Flattens Discord's nested field error object into dotted paths.
///
/// A node holding an `_errors` array contributes its messages joined by
/// spaces; any other object is walked recursively. Leaves that are neither
/// are rendered as text.
///
/// # Example
///
/// ```rust
/// use restcord::clients::flatten_errors;
/// use serde_json::json;
///
/// let errors = flatten_errors(&json!({
///     "embed": {"fields": {"0": {"name": {"_errors": [
///         {"code": "BASE_TYPE_REQUIRED", "message": "This field is required"}
///     ]}}}}
/// }));
/// assert_eq!(errors["embed.fields.0.name"], "This field is required");
/// ```
#[must_use]
pub fn flatten_errors(errors: &Value) -> BTreeMap<String, String> {
    let mut flattened = BTreeMap::new();
    if let Value::Object(map) = errors {
        flatten_into(map, "", &mut flattened);
    }
    flattened
}

fn flatten_into(
    map: &serde_json::Map<String, Value>,
    prefix: &str,
    out: &mut BTreeMap<String, String>,
) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            Value::Object(child) => match child.get("_errors") {
                Some(Value::Array(errors)) => {
                    let messages: Vec<&str> = errors
                        .iter()
                        .map(|e| e.get("message").and_then(Value::as_str).unwrap_or_default())
                        .collect();
                    out.insert(path, messages.join(" "));
                }
                _ => flatten_into(child, &path, out),
            },
            Value::String(text) => {
                out.insert(path, text.clone());
            }
            other => {
                out.insert(path, other.to_string());
            }
        }
    }
}
