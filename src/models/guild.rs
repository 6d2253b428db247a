use serde::{Deserialize, Serialize};

use super::{Emoji, Role, Snowflake};

/// A guild, sometimes called a server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Guild {
    /// The guild id.
    pub id: Snowflake,
    /// The guild name.
    pub name: String,
    /// Icon hash.
    #[serde(default)]
    pub icon: Option<String>,
    /// Splash image hash.
    #[serde(default)]
    pub splash: Option<String>,
    /// Discovery splash hash, for discoverable guilds.
    #[serde(default)]
    pub discovery_splash: Option<String>,
    /// Banner hash.
    #[serde(default)]
    pub banner: Option<String>,
    /// The guild description, for discoverable guilds.
    #[serde(default)]
    pub description: Option<String>,
    /// The id of the owner.
    #[serde(default)]
    pub owner_id: Option<Snowflake>,
    /// The id of the creating application, for bot-created guilds.
    #[serde(default)]
    pub application_id: Option<Snowflake>,
    /// Voice region id.
    #[serde(default)]
    pub region: Option<String>,
    /// The AFK voice channel.
    #[serde(default)]
    pub afk_channel_id: Option<Snowflake>,
    /// AFK timeout in seconds.
    #[serde(default)]
    pub afk_timeout: Option<u32>,
    /// The channel that receives system messages.
    #[serde(default)]
    pub system_channel_id: Option<Snowflake>,
    /// System channel flag bits.
    #[serde(default)]
    pub system_channel_flags: Option<u32>,
    /// The rules channel, for public guilds.
    #[serde(default)]
    pub rules_channel_id: Option<Snowflake>,
    /// The channel that receives notices from Discord, for public guilds.
    #[serde(default)]
    pub public_updates_channel_id: Option<Snowflake>,
    /// Whether the server widget is enabled.
    #[serde(default)]
    pub widget_enabled: Option<bool>,
    /// The channel the widget invites to.
    #[serde(default)]
    pub widget_channel_id: Option<Snowflake>,
    /// Whether the legacy server embed is enabled.
    #[serde(default)]
    pub embed_enabled: Option<bool>,
    /// The channel the legacy embed invites to.
    #[serde(default)]
    pub embed_channel_id: Option<Snowflake>,
    /// Verification level required to participate.
    #[serde(default)]
    pub verification_level: Option<u8>,
    /// Default message notification level.
    #[serde(default)]
    pub default_message_notifications: Option<u8>,
    /// Explicit content filter level.
    #[serde(default)]
    pub explicit_content_filter: Option<u8>,
    /// Required MFA level for moderation actions.
    #[serde(default)]
    pub mfa_level: Option<u8>,
    /// Enabled guild features, such as `"VANITY_URL"`.
    #[serde(default)]
    pub features: Vec<String>,
    /// Custom emoji.
    #[serde(default)]
    pub emojis: Vec<Emoji>,
    /// Roles in the guild.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Maximum number of presences.
    #[serde(default)]
    pub max_presences: Option<u64>,
    /// Maximum number of members.
    #[serde(default)]
    pub max_members: Option<u64>,
    /// Maximum number of users in a video channel.
    #[serde(default)]
    pub max_video_channel_users: Option<u64>,
    /// Vanity invite code.
    #[serde(default)]
    pub vanity_url_code: Option<String>,
    /// Server boost tier.
    #[serde(default)]
    pub premium_tier: Option<u8>,
    /// Number of server boosts.
    #[serde(default)]
    pub premium_subscription_count: Option<u64>,
    /// Preferred locale of a public guild.
    #[serde(default)]
    pub preferred_locale: Option<String>,
    /// Approximate member count, when requested with counts.
    #[serde(default)]
    pub approximate_member_count: Option<u64>,
    /// Approximate online member count, when requested with counts.
    #[serde(default)]
    pub approximate_presence_count: Option<u64>,
}

impl Guild {
    /// Returns the role with the given id, if the guild has one.
    #[must_use]
    pub fn role(&self, id: Snowflake) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    /// Returns `true` if the guild has the named feature flag.
    #[must_use]
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// The public summary of a guild, available for lurkable guilds and
/// attached to invites.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GuildPreview {
    /// The guild id.
    pub id: Snowflake,
    /// The guild name.
    pub name: String,
    /// Icon hash.
    #[serde(default)]
    pub icon: Option<String>,
    /// Splash image hash.
    #[serde(default)]
    pub splash: Option<String>,
    /// Discovery splash hash, for discoverable guilds.
    #[serde(default)]
    pub discovery_splash: Option<String>,
    /// Custom emoji.
    #[serde(default)]
    pub emojis: Vec<Emoji>,
    /// Enabled guild features, such as `"VANITY_URL"`.
    #[serde(default)]
    pub features: Vec<String>,
    /// Approximate member count, when requested with counts.
    #[serde(default)]
    pub approximate_member_count: Option<u64>,
    /// Approximate online member count, when requested with counts.
    #[serde(default)]
    pub approximate_presence_count: Option<u64>,
    /// The guild description, for discoverable guilds.
    #[serde(default)]
    pub description: Option<String>,
}
