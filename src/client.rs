//! The [`RestCord`] facade bundling every resource client.

use std::sync::Arc;

use crate::clients::HttpClient;
use crate::config::RestcordConfig;
use crate::resources::{
    ChannelClient, EmojiClient, GuildClient, InviteClient, UserClient, VoiceClient, WebhookClient,
};

/// Entry point owning one transport and handing out resource clients.
///
/// All clients returned by one `RestCord` share its rate limit state. Two
/// `RestCord` instances never share state, even with the same token.
///
/// # Thread Safety
///
/// `RestCord` is `Send + Sync` and cheap to clone.
///
/// # Example
///
/// ```rust,ignore
/// use restcord::{BotToken, RestCord, RestcordConfig};
/// use restcord::models::Snowflake;
///
/// let config = RestcordConfig::builder()
///     .token(BotToken::new("my-bot-token")?)
///     .build()?;
/// let restcord = RestCord::new(config);
///
/// let me = restcord.users().get_current_user().await?;
/// let guild = restcord.guilds().get_guild(Snowflake::new(81_384_788_765_712_384), true).await?;
/// println!("{} is in {}", me, guild.name);
/// ```
#[derive(Clone, Debug)]
pub struct RestCord {
    http: Arc<HttpClient>,
}

// Verify RestCord is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestCord>();
};

impl RestCord {
    /// Creates a facade with a fresh transport.
    #[must_use]
    pub fn new(config: RestcordConfig) -> Self {
        Self::from_http(Arc::new(HttpClient::new(config)))
    }

    /// Creates a facade around an existing transport.
    #[must_use]
    pub const fn from_http(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Returns the shared transport.
    #[must_use]
    pub const fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Returns a client for the user endpoints.
    #[must_use]
    pub fn users(&self) -> UserClient {
        UserClient::new(Arc::clone(&self.http))
    }

    /// Returns a client for the guild, member, role and ban endpoints.
    #[must_use]
    pub fn guilds(&self) -> GuildClient {
        GuildClient::new(Arc::clone(&self.http))
    }

    /// Returns a client for the channel, message, reaction and channel invite endpoints.
    #[must_use]
    pub fn channels(&self) -> ChannelClient {
        ChannelClient::new(Arc::clone(&self.http))
    }

    /// Returns a client for the guild emoji endpoints.
    #[must_use]
    pub fn emojis(&self) -> EmojiClient {
        EmojiClient::new(Arc::clone(&self.http))
    }

    /// Returns a client for the invite endpoints.
    #[must_use]
    pub fn invites(&self) -> InviteClient {
        InviteClient::new(Arc::clone(&self.http))
    }

    /// Returns a client for the voice region endpoints.
    #[must_use]
    pub fn voice(&self) -> VoiceClient {
        VoiceClient::new(Arc::clone(&self.http))
    }

    /// Returns a client for the webhook endpoints.
    #[must_use]
    pub fn webhooks(&self) -> WebhookClient {
        WebhookClient::new(Arc::clone(&self.http))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotToken;

    #[test]
    fn test_clients_share_one_transport() {
        let config = RestcordConfig::builder()
            .token(BotToken::new("test-token").unwrap())
            .build()
            .unwrap();
        let restcord = RestCord::new(config);

        let _users = restcord.users();
        let _guilds = restcord.guilds();

        assert_eq!(Arc::strong_count(restcord.http()), 3);
        assert!(restcord.http().user_agent().contains("DiscordBot"));
    }
}
