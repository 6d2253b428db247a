//! Typed clients for each area of the Discord REST API.
//!
//! Every client shares one [`HttpClient`](crate::clients::HttpClient) through
//! an `Arc`, so rate limit state is coordinated across all of them. Clients
//! are cheap to clone.
//!
//! Arguments are checked before any request is sent: a zero id, an empty
//! emoji, invite code or webhook token, or an out of range limit is returned
//! as [`HttpError::InvalidRequest`](crate::clients::HttpError::InvalidRequest).
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use restcord::{BotToken, HttpClient, RestcordConfig};
//! use restcord::models::Snowflake;
//! use restcord::resources::{ChannelClient, MessageQuery};
//!
//! let config = RestcordConfig::builder()
//!     .token(BotToken::new("my-bot-token")?)
//!     .build()?;
//! let channels = ChannelClient::new(Arc::new(HttpClient::new(config)));
//!
//! let query = MessageQuery::new().before(Snowflake::new(334_385_199_974_967_042)).limit(10);
//! let messages = channels.get_messages(Snowflake::new(290_926_798_999_357_250), query).await?;
//! ```

mod channel;
mod emoji;
mod guild;
mod invite;
mod user;
mod voice;
mod webhook;

pub use channel::{ChannelClient, CreateInvite, MessageQuery, ReactionQuery};
pub use emoji::EmojiClient;
pub use guild::GuildClient;
pub use invite::InviteClient;
pub use user::UserClient;
pub use voice::VoiceClient;
pub use webhook::WebhookClient;

use std::ops::RangeInclusive;

use crate::clients::InvalidHttpRequestError;
use crate::models::Snowflake;

/// Rejects the zero id, which the API never assigns.
fn require_id(name: &'static str, id: Snowflake) -> Result<Snowflake, InvalidHttpRequestError> {
    if id.is_zero() {
        return Err(InvalidHttpRequestError::MissingArgument { name });
    }
    Ok(id)
}

/// Rejects empty or whitespace-only text arguments.
fn require_text<'a>(name: &'static str, value: &'a str) -> Result<&'a str, InvalidHttpRequestError> {
    if value.trim().is_empty() {
        return Err(InvalidHttpRequestError::MissingArgument { name });
    }
    Ok(value)
}

fn require_range<T>(
    name: &'static str,
    value: T,
    range: RangeInclusive<T>,
) -> Result<T, InvalidHttpRequestError>
where
    T: PartialOrd + std::fmt::Display,
{
    if !range.contains(&value) {
        return Err(InvalidHttpRequestError::InvalidArgument {
            name,
            reason: format!(
                "{value} is outside the accepted range {}..={}",
                range.start(),
                range.end()
            ),
        });
    }
    Ok(value)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::clients::HttpClient;
    use crate::config::{ApiUrl, BotToken, RestcordConfig};

    /// A transport pointed at a port nothing listens on; tests that use it
    /// must fail before any request is sent.
    pub fn offline_http() -> Arc<HttpClient> {
        let config = RestcordConfig::builder()
            .token(BotToken::new("test-token").unwrap())
            .base_url(ApiUrl::new("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap();
        Arc::new(HttpClient::new(config))
    }
}
