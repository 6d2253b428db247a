//! # restcord
//!
//! An asynchronous client for the Discord REST API, built around a transport
//! that follows Discord's rate limiting rules.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`RestcordConfig`] and [`RestcordConfigBuilder`]
//! - An async HTTP transport ([`HttpClient`]) with per-bucket rate limit locks,
//!   a shared global rate limit gate and bounded retries
//! - A typed error taxonomy ([`HttpError`]) mapping HTTP statuses and Discord
//!   error bodies
//! - Resource clients for users, guilds, channels, emoji, invites, voice
//!   regions and webhooks, bundled by [`RestCord`]
//! - Typed models for every entity those clients return
//!
//! ## Quick Start
//!
//! ```rust
//! use restcord::{BotToken, RestCord, RestcordConfig};
//!
//! let config = RestcordConfig::builder()
//!     .token(BotToken::new("my-bot-token").unwrap())
//!     .user_agent_prefix("MyBot/1.0")
//!     .build()
//!     .unwrap();
//!
//! let restcord = RestCord::new(config);
//! let users = restcord.users();
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use restcord::{BotToken, HttpError, RestCord, RestcordConfig};
//! use restcord::models::Snowflake;
//! use restcord::resources::MessageQuery;
//!
//! let restcord = RestCord::new(
//!     RestcordConfig::builder()
//!         .token(BotToken::new("my-bot-token")?)
//!         .build()?,
//! );
//!
//! let channel_id = Snowflake::new(290_926_798_999_357_250);
//! match restcord.channels().get_messages(channel_id, MessageQuery::new().limit(10)).await {
//!     Ok(messages) => println!("fetched {} messages", messages.len()),
//!     Err(HttpError::Forbidden(e)) => println!("missing access: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Rate Limits
//!
//! Requests are grouped into buckets by endpoint and by the channel, guild or
//! webhook they address. At most one request per bucket is in flight; when a
//! response reports the bucket exhausted, the next request waits for the
//! reset. A global 429 pauses every request on the transport. See
//! [`clients`] for the retry rules.
//!
//! ## Design Principles
//!
//! - **No global state**: Rate limit state belongs to one [`HttpClient`]
//! - **Fail-fast validation**: Configuration and arguments are checked before
//!   any request is sent
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod resources;

// Re-export public types at crate root for convenience
pub use client::RestCord;
pub use config::{ApiUrl, BotToken, ProxyAuth, RestcordConfig, RestcordConfigBuilder, RetryPolicy};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpResponseError, InvalidHttpRequestError,
    RateLimitedError, RequestOptions, ResponseBody, Route,
};
