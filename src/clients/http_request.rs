//! HTTP request types for the restcord client.
//!
//! This module provides the [`HttpMethod`] enum, the per-call
//! [`RequestOptions`] (JSON payload and query parameters), and the compact
//! ASCII-only JSON encoding used for request bodies.

use std::fmt;
use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Discord API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for creating or replacing resources.
    Put,
    /// HTTP PATCH method for modifying resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method as a `reqwest` method.
    #[must_use]
    pub const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A value that can be sent as a query parameter.
///
/// Integers are rendered in decimal and booleans as `1`/`0`, which is how
/// Discord reads flags such as `with_counts`.
pub trait QueryValue {
    /// Renders the value for the query string.
    fn to_query_value(&self) -> String;
}

macro_rules! impl_query_value_for_integers {
    ($($ty:ty),*) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_query_value_for_integers!(u8, u16, u32, u64, usize, i32, i64);

impl QueryValue for bool {
    fn to_query_value(&self) -> String {
        String::from(if *self { "1" } else { "0" })
    }
}

impl QueryValue for str {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for String {
    fn to_query_value(&self) -> String {
        self.clone()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> String {
        (**self).to_query_value()
    }
}

/// Per-call options: an optional JSON payload and query parameters.
///
/// # Example
///
/// ```rust
/// use restcord::clients::RequestOptions;
/// use serde_json::json;
///
/// let options = RequestOptions::new()
///     .query("with_counts", true)
///     .query_opt("limit", Some(50_u32))
///     .query_opt::<u64>("after", None)
///     .json(json!({"max_age": 0}));
///
/// assert_eq!(
///     options.query_pairs(),
///     &[("with_counts".to_string(), "1".to_string()), ("limit".to_string(), "50".to_string())]
/// );
/// assert!(options.payload().is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    json: Option<Value>,
    query: Vec<(String, String)>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the JSON payload.
    #[must_use]
    pub fn json(mut self, payload: Value) -> Self {
        self.json = Some(payload);
        self
    }

    /// Serializes `payload` and sets it as the JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidBody`] if `payload` cannot be
    /// represented as JSON.
    pub fn serialize_json<T: Serialize + ?Sized>(
        self,
        payload: &T,
    ) -> Result<Self, InvalidHttpRequestError> {
        let value = serde_json::to_value(payload).map_err(|e| {
            InvalidHttpRequestError::InvalidBody {
                reason: e.to_string(),
            }
        })?;
        Ok(self.json(value))
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl QueryValue) -> Self {
        self.query.push((key.into(), value.to_query_value()));
        self
    }

    /// Appends a query parameter when `value` is `Some`.
    #[must_use]
    pub fn query_opt<V: QueryValue>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Returns the JSON payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Returns the query parameters in insertion order.
    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Encodes the payload for the wire, if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidBody`] if encoding fails.
    pub fn encoded_body(&self) -> Result<Option<String>, InvalidHttpRequestError> {
        self.json.as_ref().map(to_ascii_json).transpose()
    }
}

/// Serializes `value` as compact JSON with every non-ASCII character
/// escaped as `\uXXXX` (UTF-16 surrogate pairs above the BMP).
///
/// # Errors
///
/// Returns [`InvalidHttpRequestError::InvalidBody`] if `value` fails to
/// serialize.
///
/// # Example
///
/// ```rust
/// use restcord::clients::to_ascii_json;
/// use serde_json::json;
///
/// let body = to_ascii_json(&json!({"name": "caf\u{e9} \u{1f389}"})).unwrap();
/// assert_eq!(body, r#"{"name":"caf\u00e9 \ud83c\udf89"}"#);
/// ```
pub fn to_ascii_json<T: Serialize + ?Sized>(value: &T) -> Result<String, InvalidHttpRequestError> {
    let invalid = |reason: String| InvalidHttpRequestError::InvalidBody { reason };

    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, AsciiFormatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| invalid(e.to_string()))?;
    String::from_utf8(out).map_err(|e| invalid(e.to_string()))
}

/// Compact formatter that escapes non-ASCII characters.
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..index])?;
            let mut units = [0_u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display_and_reqwest_mapping() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.as_reqwest(), reqwest::Method::DELETE);
        assert_eq!(HttpMethod::Put.as_reqwest(), reqwest::Method::PUT);
    }

    #[test]
    fn test_query_values_render_integers_and_flags() {
        assert_eq!(42_u64.to_query_value(), "42");
        assert_eq!((-1_i64).to_query_value(), "-1");
        assert_eq!(true.to_query_value(), "1");
        assert_eq!(false.to_query_value(), "0");
        assert_eq!("abc".to_query_value(), "abc");
    }

    #[test]
    fn test_query_opt_skips_none() {
        let options = RequestOptions::new()
            .query_opt::<u32>("limit", None)
            .query("after", 5_u64);

        assert_eq!(
            options.query_pairs(),
            &[("after".to_string(), "5".to_string())]
        );
    }

    #[test]
    fn test_options_without_payload_have_no_body() {
        assert_eq!(RequestOptions::new().encoded_body().unwrap(), None);
    }

    #[test]
    fn test_serialize_json_from_struct() {
        #[derive(Serialize)]
        struct Payload {
            messages: Vec<String>,
        }

        let options = RequestOptions::new()
            .serialize_json(&Payload {
                messages: vec!["1".to_string(), "2".to_string()],
            })
            .unwrap();

        assert_eq!(
            options.encoded_body().unwrap().as_deref(),
            Some(r#"{"messages":["1","2"]}"#)
        );
    }

    #[test]
    fn test_ascii_json_is_compact() {
        let body = to_ascii_json(&json!({"a": [1, 2], "b": {"c": null}})).unwrap();
        assert_eq!(body, r#"{"a":[1,2],"b":{"c":null}}"#);
    }

    #[test]
    fn test_ascii_json_escapes_non_ascii() {
        let body = to_ascii_json(&json!("na\u{ef}ve \u{2713}")).unwrap();
        assert_eq!(body, r#""na\u00efve \u2713""#);
        assert!(body.is_ascii());
    }

    #[test]
    fn test_ascii_json_uses_surrogate_pairs() {
        let body = to_ascii_json(&json!("\u{1f600}")).unwrap();
        assert_eq!(body, r#""\ud83d\ude00""#);

        let decoded: String = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded, "\u{1f600}");
    }

    #[test]
    fn test_ascii_json_keeps_standard_escapes() {
        let body = to_ascii_json(&json!("line\n\"quoted\"")).unwrap();
        assert_eq!(body, r#""line\n\"quoted\"""#);
    }
}
