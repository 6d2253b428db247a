use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Snowflake, User};

/// A channel webhook.
///
/// `token` is only present for incoming webhooks fetched by their owner, and
/// is masked in `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct Webhook {
    /// The webhook id.
    pub id: Snowflake,
    /// The webhook type.
    #[serde(rename = "type", default)]
    pub kind: u8,
    /// The guild the webhook posts to.
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    /// The channel the webhook posts to.
    #[serde(default)]
    pub channel_id: Option<Snowflake>,
    /// The user who created the webhook.
    #[serde(default)]
    pub user: Option<User>,
    /// The default webhook name.
    #[serde(default)]
    pub name: Option<String>,
    /// The default avatar hash.
    #[serde(default)]
    pub avatar: Option<String>,
    /// The secure token, for incoming webhooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl fmt::Debug for Webhook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Webhook")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("guild_id", &self.guild_id)
            .field("channel_id", &self.channel_id)
            .field("user", &self.user)
            .field("name", &self.name)
            .field("avatar", &self.avatar)
            .field("token", &self.token.as_ref().map(|_| "*****"))
            .finish()
    }
}
