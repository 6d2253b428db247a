use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{PermissionOverwrite, Snowflake};

/// The kind of a channel.
///
/// Kinds this crate does not know about are kept as [`ChannelType::Other`]
/// rather than failing deserialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelType {
    /// A text channel in a guild.
    GuildText,
    /// A direct message between two users.
    Dm,
    /// A voice channel in a guild.
    GuildVoice,
    /// A direct message between several users.
    GroupDm,
    /// A category that groups other channels.
    GuildCategory,
    /// An announcement channel that users can follow.
    GuildNews,
    /// A store channel for selling games.
    GuildStore,
    /// Any kind not listed above, with its raw value.
    Other(u8),
}

impl ChannelType {
    /// Returns the integer the API uses for this kind.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::GuildText => 0,
            Self::Dm => 1,
            Self::GuildVoice => 2,
            Self::GroupDm => 3,
            Self::GuildCategory => 4,
            Self::GuildNews => 5,
            Self::GuildStore => 6,
            Self::Other(code) => code,
        }
    }
}

impl From<u8> for ChannelType {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::GuildText,
            1 => Self::Dm,
            2 => Self::GuildVoice,
            3 => Self::GroupDm,
            4 => Self::GuildCategory,
            5 => Self::GuildNews,
            6 => Self::GuildStore,
            other => Self::Other(other),
        }
    }
}

impl Serialize for ChannelType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for ChannelType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u8::deserialize(deserializer).map(Self::from)
    }
}

/// A guild or private channel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Channel {
    /// The channel id.
    pub id: Snowflake,
    /// The kind of channel.
    #[serde(rename = "type")]
    pub kind: ChannelType,
    /// The guild this channel belongs to, if any.
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    /// The channel name (2-100 characters).
    #[serde(default)]
    pub name: Option<String>,
    /// Sorting position among its siblings.
    #[serde(default)]
    pub position: Option<i32>,
    /// Explicit permission overwrites for members and roles.
    #[serde(default)]
    pub permission_overwrites: Vec<PermissionOverwrite>,
    /// The parent category, if any.
    #[serde(default)]
    pub parent_id: Option<Snowflake>,
    /// The id of the last message sent, which may no longer exist.
    #[serde(default)]
    pub last_message_id: Option<Snowflake>,
    /// When the last message was pinned.
    #[serde(default)]
    pub last_pin_timestamp: Option<DateTime<Utc>>,
    /// The channel topic (0-1024 characters).
    #[serde(default)]
    pub topic: Option<String>,
    /// Whether the channel is marked as NSFW.
    #[serde(default)]
    pub nsfw: bool,
}

impl Channel {
    /// Returns the string that mentions this channel in a message.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "#{name}"),
            None => write!(f, "{}", self.id),
        }
    }
}
