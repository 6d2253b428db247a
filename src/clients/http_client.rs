//! HTTP transport for Discord API communication.
//!
//! This module provides the [`HttpClient`] type, which sends authenticated
//! requests, cooperates with Discord's rate limits and retries transient
//! failures.

use std::time::SystemTime;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use crate::clients::errors::{HttpError, RateLimitedError};
use crate::clients::http_request::RequestOptions;
use crate::clients::http_response::{
    duration_from_secs, HttpResponse, RateLimitHeaders, ResponseBody,
};
use crate::clients::ratelimit::{BucketGuard, RateLimiter};
use crate::clients::route::Route;
use crate::config::RestcordConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project URL sent in the `User-Agent` header.
const SDK_URL: &str = env!("CARGO_PKG_REPOSITORY");

/// HTTP transport for the Discord API.
///
/// The client handles:
/// - `Authorization`, `User-Agent` and rate limit precision headers
/// - Per-bucket serialization of requests and deferred release of exhausted buckets
/// - The global rate limit gate
/// - Retries for 429, 500 and 502 responses, bounded by the configured [`RetryPolicy`](crate::RetryPolicy)
/// - Mapping of failed responses to [`HttpError`] variants
///
/// The underlying `reqwest::Client` is created on first use unless one was
/// supplied through the configuration.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. Share it with `Arc` so that all callers
/// use the same rate limit state.
///
/// # Example
///
/// ```rust,ignore
/// use restcord::{BotToken, RestcordConfig};
/// use restcord::clients::{HttpClient, HttpMethod, RequestOptions, Route};
///
/// let config = RestcordConfig::builder()
///     .token(BotToken::new("my-bot-token")?)
///     .build()?;
/// let client = HttpClient::new(config);
///
/// let route = Route::builder(HttpMethod::Get, "/users/{user_id}")
///     .param("user_id", 80_351_110_224_678_912_u64)
///     .build()?;
///
/// let body = client.request(&route, RequestOptions::new()).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    config: RestcordConfig,
    user_agent: String,
    client: OnceCell<reqwest::Client>,
    limiter: RateLimiter,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a transport from a configuration.
    ///
    /// No connection is made until the first request.
    #[must_use]
    pub fn new(config: RestcordConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}DiscordBot ({SDK_URL}, {SDK_VERSION}) Rust/{rust_version}");

        let client = OnceCell::new_with(config.http_client().cloned());

        Self {
            config,
            user_agent,
            client,
            limiter: RateLimiter::new(),
        }
    }

    /// Returns the configuration this transport was created with.
    #[must_use]
    pub const fn config(&self) -> &RestcordConfig {
        &self.config
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the rate limit state shared by every request on this transport.
    #[must_use]
    pub const fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Sends a request and returns the decoded body of the successful response.
    ///
    /// The request waits for the global gate and its bucket before it is
    /// sent. 429 responses are retried after the wait the API asks for; 500
    /// and 502 responses are retried with the configured backoff. All other
    /// failures return immediately.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - The route or payload is invalid (`InvalidRequest`)
    /// - A network error occurs (`Network`)
    /// - A 429 lacks a `Via` header or a `retry_after` (`MalformedRateLimit`)
    /// - A non-2xx response is received, or retries are exhausted (one of the
    ///   status variants)
    pub async fn request(
        &self,
        route: &Route,
        options: RequestOptions,
    ) -> Result<ResponseBody, HttpError> {
        let url = route.url(self.config.base_url().as_ref());
        let body = options.encoded_body()?;
        let client = self.client().await?;
        let retry = self.config.retry();

        if self.limiter.is_global_closed() {
            tracing::debug!("{route} is waiting for the global rate limit");
        }
        self.limiter.wait_for_global().await;
        let mut guard = self.limiter.acquire(route.bucket()).await;

        let mut attempt: u32 = 0;
        loop {
            if attempt > 0 {
                self.limiter.wait_for_global().await;
            }
            guard.wait_deferred().await;

            let response = self
                .send(client, route, &url, &options, body.as_deref())
                .await?;
            attempt += 1;

            Self::defer_if_exhausted(&mut guard, &response);

            if response.is_success() {
                tracing::debug!("{route} has received {}", response.body);
                return Ok(response.body);
            }

            let exhausted = attempt >= retry.max_attempts;
            match response.status {
                429 => {
                    let limited = Self::parse_rate_limit(&response)?;
                    if exhausted {
                        return Err(HttpError::RateLimited(limited));
                    }

                    let wait = duration_from_secs(limited.retry_after);
                    tracing::warn!(
                        "We are being rate limited. Retrying in {:.2} seconds. Handled under the bucket \"{}\"",
                        wait.as_secs_f64(),
                        guard.bucket()
                    );
                    if limited.global {
                        tracing::warn!(
                            "Global rate limit has been hit. Retrying in {:.2} seconds.",
                            wait.as_secs_f64()
                        );
                        self.limiter.close_global_for(wait);
                    }

                    tokio::time::sleep(wait).await;
                    tracing::debug!("Done sleeping for the rate limit. Retrying...");
                }
                500 | 502 => {
                    if exhausted {
                        return Err(HttpError::from_response(response.status, &response.body));
                    }

                    let wait = retry.server_error_delay(attempt - 1);
                    tracing::warn!(
                        "{route} returned {}, retrying in {:.2} seconds (attempt {attempt} of {})",
                        response.status,
                        wait.as_secs_f64(),
                        retry.max_attempts
                    );
                    tokio::time::sleep(wait).await;
                }
                status => return Err(HttpError::from_response(status, &response.body)),
            }
        }
    }

    /// Sends a request and deserializes the successful body into `T`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`request`](Self::request), or
    /// [`HttpError::Decode`] if the body does not match `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        route: &Route,
        options: RequestOptions,
    ) -> Result<T, HttpError> {
        let body = self.request(route, options).await?;
        Ok(body.deserialize()?)
    }

    /// Returns the HTTP client, building it on first use.
    async fn client(&self) -> Result<&reqwest::Client, HttpError> {
        self.client
            .get_or_try_init(|| async { self.build_client() })
            .await
    }

    fn build_client(&self) -> Result<reqwest::Client, HttpError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();

        if let Some(timeout) = self.config.timeout() {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = self.config.proxy() {
            let mut proxy = reqwest::Proxy::all(proxy_url.to_string())?;
            if let Some(auth) = self.config.proxy_auth() {
                proxy = proxy.basic_auth(&auth.username, &auth.password);
            }
            builder = builder.proxy(proxy);
        }

        Ok(builder.build()?)
    }

    /// Performs one HTTP exchange.
    async fn send(
        &self,
        client: &reqwest::Client,
        route: &Route,
        url: &str,
        options: &RequestOptions,
        body: Option<&str>,
    ) -> Result<HttpResponse, HttpError> {
        let mut request = client
            .request(route.method().as_reqwest(), url)
            .header(USER_AGENT, &self.user_agent)
            .header(AUTHORIZATION, self.config.token().authorization())
            .header("X-RateLimit-Precision", "millisecond");

        if !options.query_pairs().is_empty() {
            request = request.query(options.query_pairs());
        }

        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let res = request.send().await?;

        let status = res.status().as_u16();
        let rate_limit = RateLimitHeaders::parse(res.headers());
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let text = res.text().await?;

        tracing::debug!(
            "{route} with {} has returned {status}",
            body.unwrap_or("no body")
        );
        if let Some(bucket) = &rate_limit.bucket {
            tracing::debug!(
                "{route} is in Discord bucket {bucket} ({} remaining)",
                rate_limit
                    .remaining
                    .map_or_else(|| "unknown".to_string(), |r| r.to_string())
            );
        }

        Ok(HttpResponse {
            status,
            rate_limit,
            body: ResponseBody::decode(content_type.as_deref(), text),
        })
    }

    /// Defers the bucket release when the response says it is exhausted.
    ///
    /// A 429 carries its own wait, so it never defers.
    fn defer_if_exhausted(guard: &mut BucketGuard, response: &HttpResponse) {
        if response.status == 429 || !response.rate_limit.is_exhausted() {
            return;
        }
        if let Some(delay) = response.rate_limit.reset_delay(SystemTime::now()) {
            tracing::debug!(
                "A rate limit bucket has been exhausted (bucket: {}, retry: {:.3}s).",
                guard.bucket(),
                delay.as_secs_f64()
            );
            guard.defer_for(delay);
        }
    }

    /// Validates the framing of a 429 response.
    fn parse_rate_limit(response: &HttpResponse) -> Result<RateLimitedError, HttpError> {
        if !response.rate_limit.via {
            return Err(HttpError::MalformedRateLimit {
                reason: "missing Via header",
                body: response.body.to_string(),
            });
        }
        RateLimitedError::from_body(&response.body).ok_or_else(|| HttpError::MalformedRateLimit {
            reason: "missing retry_after",
            body: response.body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiUrl, BotToken, ProxyAuth};
    use serde_json::json;

    fn config() -> RestcordConfig {
        RestcordConfig::builder()
            .token(BotToken::new("test-token").unwrap())
            .build()
            .unwrap()
    }

    fn response(status: u16, rate_limit: RateLimitHeaders, body: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status,
            rate_limit,
            body: ResponseBody::Json(body),
        }
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(config());

        assert!(client.user_agent().starts_with("DiscordBot ("));
        assert!(client.user_agent().contains(SDK_VERSION));
        assert!(client.user_agent().contains("Rust/"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = RestcordConfig::builder()
            .token(BotToken::new("test-token").unwrap())
            .user_agent_prefix("MyBot/1.0")
            .build()
            .unwrap();

        let client = HttpClient::new(config);

        assert!(client.user_agent().starts_with("MyBot/1.0 | DiscordBot"));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }

    #[tokio::test]
    async fn test_supplied_client_is_used_without_building() {
        let config = RestcordConfig::builder()
            .token(BotToken::new("test-token").unwrap())
            .http_client(reqwest::Client::new())
            .build()
            .unwrap();
        let client = HttpClient::new(config);

        assert!(client.client.initialized());
        assert!(client.client().await.is_ok());
    }

    #[tokio::test]
    async fn test_client_is_built_lazily_with_proxy() {
        let config = RestcordConfig::builder()
            .token(BotToken::new("test-token").unwrap())
            .proxy(ApiUrl::new("http://127.0.0.1:3128").unwrap())
            .proxy_auth(ProxyAuth::new("user", "pass"))
            .build()
            .unwrap();
        let client = HttpClient::new(config);

        assert!(!client.client.initialized());
        assert!(client.client().await.is_ok());
        assert!(client.client.initialized());
    }

    #[tokio::test]
    async fn test_exhausted_success_defers_bucket() {
        let client = HttpClient::new(config());
        let mut guard = client.rate_limiter().acquire("bucket").await;
        let limits = RateLimitHeaders {
            remaining: Some(0),
            reset_after: Some(1.0),
            ..RateLimitHeaders::default()
        };

        HttpClient::defer_if_exhausted(&mut guard, &response(200, limits, json!({})));

        assert!(guard.release_at().is_some());
    }

    #[tokio::test]
    async fn test_rate_limited_response_does_not_defer() {
        let client = HttpClient::new(config());
        let mut guard = client.rate_limiter().acquire("bucket").await;
        let limits = RateLimitHeaders {
            remaining: Some(0),
            reset_after: Some(1.0),
            via: true,
            ..RateLimitHeaders::default()
        };

        HttpClient::defer_if_exhausted(
            &mut guard,
            &response(429, limits, json!({"retry_after": 10})),
        );

        assert!(guard.release_at().is_none());
    }

    #[test]
    fn test_parse_rate_limit_requires_via_header() {
        let result = HttpClient::parse_rate_limit(&response(
            429,
            RateLimitHeaders::default(),
            json!({"retry_after": 10}),
        ));

        assert!(matches!(
            result,
            Err(HttpError::MalformedRateLimit {
                reason: "missing Via header",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_rate_limit_requires_retry_after() {
        let limits = RateLimitHeaders {
            via: true,
            ..RateLimitHeaders::default()
        };

        let result = HttpClient::parse_rate_limit(&response(429, limits, json!({"global": true})));

        assert!(matches!(
            result,
            Err(HttpError::MalformedRateLimit {
                reason: "missing retry_after",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_rate_limit_reads_global_flag() {
        let limits = RateLimitHeaders {
            via: true,
            ..RateLimitHeaders::default()
        };

        let limited = HttpClient::parse_rate_limit(&response(
            429,
            limits,
            json!({"retry_after": 1500, "global": true}),
        ))
        .unwrap();

        assert!(limited.global);
        assert!((limited.retry_after - 1.5).abs() < f64::EPSILON);
    }
}
