use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Snowflake, User};

/// A message sent in a channel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    /// The message id.
    pub id: Snowflake,
    /// The channel the message was sent in.
    pub channel_id: Snowflake,
    /// The guild the message was sent in, if any.
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    /// The author, absent for some webhook messages.
    #[serde(default)]
    pub author: Option<User>,
    /// The message text.
    #[serde(default)]
    pub content: String,
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,
    /// When the message was last edited.
    #[serde(default)]
    pub edited_timestamp: Option<DateTime<Utc>>,
    /// Whether this was a text-to-speech message.
    #[serde(default)]
    pub tts: bool,
    /// Whether the message mentions everyone.
    #[serde(default)]
    pub mention_everyone: bool,
    /// Whether the message is pinned.
    #[serde(default)]
    pub pinned: bool,
    /// The message type.
    #[serde(rename = "type", default)]
    pub kind: u8,
}

impl Message {
    /// Returns `true` if the message was edited after it was sent.
    #[must_use]
    pub const fn is_edited(&self) -> bool {
        self.edited_timestamp.is_some()
    }
}
