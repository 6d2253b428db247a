//! User and guild member models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Identified, Snowflake};

/// A Discord user.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    /// The user id.
    pub id: Snowflake,
    /// The user name, not unique across Discord.
    pub username: String,
    /// The 4-digit tag.
    #[serde(default)]
    pub discriminator: String,
    /// Avatar hash.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Whether the user is a bot.
    #[serde(default)]
    pub bot: bool,
    /// Public user flag bits.
    #[serde(default)]
    pub public_flags: Option<u64>,
}

impl User {
    /// Returns the string that mentions this user in a message.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    /// Returns `username#discriminator`.
    #[must_use]
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

/// A user's membership of a guild.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Member {
    /// The underlying user.
    pub user: User,
    /// Guild nickname, if set.
    #[serde(default)]
    pub nick: Option<String>,
    /// Ids of the roles the member has.
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    /// When the member joined the guild.
    pub joined_at: DateTime<Utc>,
    /// When the member started boosting the guild.
    #[serde(default)]
    pub premium_since: Option<DateTime<Utc>>,
    /// Whether the member is deafened in voice channels.
    #[serde(default)]
    pub deaf: bool,
    /// Whether the member is muted in voice channels.
    #[serde(default)]
    pub mute: bool,
}

impl Member {
    /// Returns the nickname if one is set, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or(&self.user.username)
    }

    /// Returns the string that mentions this member in a message.
    #[must_use]
    pub fn mention(&self) -> String {
        if self.nick.is_some() {
            format!("<@!{}>", self.user.id)
        } else {
            self.user.mention()
        }
    }
}

impl Identified for Member {
    fn id(&self) -> Snowflake {
        self.user.id
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Member {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_deserialization() {
        let user: User = serde_json::from_value(json!({
            "id": "123",
            "username": "bob",
            "discriminator": "0001",
            "avatar": null
        }))
        .unwrap();

        assert_eq!(user.id, Snowflake::new(123));
        assert_eq!(user.username, "bob");
        assert_eq!(user.discriminator, "0001");
        assert!(user.avatar.is_none());
        assert!(!user.bot);
        assert_eq!(user.mention(), "<@123>");
        assert_eq!(user.to_string(), "bob#0001");
    }

    #[test]
    fn test_users_are_equal_by_id() {
        let first: User = serde_json::from_value(json!({"id": "1", "username": "old"})).unwrap();
        let renamed: User = serde_json::from_value(json!({"id": "1", "username": "new"})).unwrap();
        let other: User = serde_json::from_value(json!({"id": "2", "username": "old"})).unwrap();

        assert_eq!(first, renamed);
        assert_ne!(first, other);
    }

    #[test]
    fn test_member_deserialization() {
        let member: Member = serde_json::from_value(json!({
            "user": {"id": "80351110224678912", "username": "Nelly", "discriminator": "1337"},
            "nick": "NOT API SUPPORT",
            "roles": ["41771983423143936"],
            "joined_at": "2015-04-26T06:26:56.936000+00:00",
            "premium_since": null,
            "deaf": false,
            "mute": true
        }))
        .unwrap();

        assert_eq!(member.id(), Snowflake::new(80_351_110_224_678_912));
        assert_eq!(member.display_name(), "NOT API SUPPORT");
        assert_eq!(member.mention(), "<@!80351110224678912>");
        assert_eq!(member.roles, vec![Snowflake::new(41_771_983_423_143_936)]);
        assert_eq!(member.joined_at.timestamp(), 1_430_029_616);
        assert!(member.premium_since.is_none());
        assert!(member.mute);
    }

    #[test]
    fn test_member_without_nick_uses_username() {
        let member: Member = serde_json::from_value(json!({
            "user": {"id": "5", "username": "plain"},
            "joined_at": "2020-01-01T00:00:00+00:00"
        }))
        .unwrap();

        assert_eq!(member.display_name(), "plain");
        assert_eq!(member.mention(), "<@5>");
    }
}
