//! HTTP transport layer for the Discord REST API.
//!
//! This module provides the foundation every resource client is built on:
//! authenticated requests, rate limit coordination, retries and the typed
//! error taxonomy.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async transport that sends requests and drives retries
//! - [`Route`]: One endpoint call (method, substituted path, rate limit bucket)
//! - [`RequestOptions`]: JSON payload and query parameters for a call
//! - [`RateLimiter`]: Per-bucket locks and the global rate limit gate
//! - [`ResponseBody`]: A decoded response body (JSON or text)
//! - [`HttpError`]: The error returned by every operation
//!
//! # Example
//!
//! ```rust,ignore
//! use restcord::{BotToken, RestcordConfig};
//! use restcord::clients::{HttpClient, HttpMethod, RequestOptions, Route};
//!
//! let config = RestcordConfig::builder()
//!     .token(BotToken::new("my-bot-token")?)
//!     .build()?;
//! let client = HttpClient::new(config);
//!
//! let route = Route::builder(HttpMethod::Get, "/guilds/{guild_id}")
//!     .param("guild_id", 81_384_788_765_712_384_u64)
//!     .build()?;
//! let options = RequestOptions::new().query("with_counts", true);
//!
//! let guild: serde_json::Value = client.request_json(&route, options).await?;
//! ```
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Waits for the body's `retry_after`; a global limit
//!   also closes the gate for every other request on the same client
//! - **500, 502 (Server Error)**: Waits `base_delay + attempt * step_delay`
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! Both retry kinds share one attempt cap (5 by default, see
//! [`RetryPolicy`](crate::RetryPolicy)). When it is reached the error for the
//! last response is returned.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod ratelimit;
mod route;

pub use errors::{
    flatten_errors, HttpError, HttpResponseError, InvalidHttpRequestError, RateLimitedError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{to_ascii_json, HttpMethod, QueryValue, RequestOptions};
pub use http_response::{HttpResponse, RateLimitHeaders, ResponseBody};
pub use ratelimit::{BucketGuard, RateLimiter, DEFAULT_SWEEP_THRESHOLD};
pub use route::{Route, RouteBuilder, RouteParam};
