use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Channel, GuildPreview, User};

/// An invite code for a guild channel.
///
/// The metadata fields (`uses`, `max_uses` and so on) are only present when
/// the invite was fetched by someone allowed to manage it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Invite {
    /// The invite code.
    pub code: String,
    /// The guild the invite is for.
    #[serde(default)]
    pub guild: Option<GuildPreview>,
    /// The channel the invite is for.
    #[serde(default)]
    pub channel: Option<Channel>,
    /// The user who created the invite.
    #[serde(default)]
    pub inviter: Option<User>,
    /// The user whose stream the invite targets.
    #[serde(default)]
    pub target_user: Option<User>,
    /// The kind of target user invite.
    #[serde(default)]
    pub target_user_type: Option<u8>,
    /// Approximate online member count, when requested with counts.
    #[serde(default)]
    pub approximate_presence_count: Option<u64>,
    /// Approximate member count, when requested with counts.
    #[serde(default)]
    pub approximate_member_count: Option<u64>,
    /// Number of times the invite has been used.
    #[serde(default)]
    pub uses: Option<u32>,
    /// Maximum number of uses, or 0 for unlimited.
    #[serde(default)]
    pub max_uses: Option<u32>,
    /// Lifetime in seconds, or 0 for never.
    #[serde(default)]
    pub max_age: Option<u32>,
    /// Whether the invite grants temporary membership.
    #[serde(default)]
    pub temporary: Option<bool>,
    /// When the invite was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Invite {
    /// Returns the shareable invite URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!("https://discord.gg/{}", self.code)
    }
}

impl fmt::Display for Invite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl PartialEq for Invite {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Invite {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChannelType;

    #[test]
    fn test_invite_with_counts() {
        let json = r#"{
            "code": "0vCdhLbwjZZTWZLD",
            "guild": {
                "id": "165176875973476352",
                "name": "CS:GO Fraggers Only",
                "splash": null,
                "icon": null,
                "features": []
            },
            "channel": {"id": "165176875973476352", "name": "illuminati", "type": 0},
            "inviter": {"id": "115590097100865541", "username": "speed", "discriminator": "7381"},
            "target_user_type": 1,
            "approximate_presence_count": 10,
            "approximate_member_count": 34
        }"#;

        let invite: Invite = serde_json::from_str(json).unwrap();

        assert_eq!(invite.code, "0vCdhLbwjZZTWZLD");
        assert_eq!(invite.guild.as_ref().unwrap().name, "CS:GO Fraggers Only");
        assert_eq!(invite.channel.as_ref().unwrap().kind, ChannelType::GuildText);
        assert_eq!(invite.approximate_member_count, Some(34));
        assert_eq!(invite.target_user_type, Some(1));
        assert!(invite.uses.is_none());
        assert_eq!(invite.url(), "https://discord.gg/0vCdhLbwjZZTWZLD");
    }

    #[test]
    fn test_invite_with_metadata() {
        let json = r#"{
            "code": "abc",
            "uses": 3,
            "max_uses": 10,
            "max_age": 86400,
            "temporary": false,
            "created_at": "2016-03-31T19:15:39.954000+00:00"
        }"#;

        let invite: Invite = serde_json::from_str(json).unwrap();

        assert!(invite.guild.is_none());
        assert_eq!(invite.uses, Some(3));
        assert_eq!(invite.max_age, Some(86_400));
        assert!(invite.created_at.is_some());
        assert_eq!(invite.to_string(), "abc");
    }
}
