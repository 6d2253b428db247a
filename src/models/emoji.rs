use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Snowflake, User};

/// A custom guild emoji, or a unicode emoji when `id` is absent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Emoji {
    /// The emoji id, or `None` for standard unicode emoji.
    #[serde(default)]
    pub id: Option<Snowflake>,
    /// The emoji name, or the unicode character for standard emoji.
    #[serde(default)]
    pub name: Option<String>,
    /// Roles allowed to use this emoji.
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    /// The user who uploaded the emoji.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Whether the emoji must be wrapped in colons.
    #[serde(default)]
    pub require_colons: bool,
    /// Whether the emoji is managed by an integration.
    #[serde(default)]
    pub managed: bool,
    /// Whether the emoji is animated.
    #[serde(default)]
    pub animated: bool,
    /// Whether the emoji can be used; `false` after losing server boosts.
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

impl Emoji {
    /// Returns the form the reaction endpoints expect: `name:id` for custom
    /// emoji, the bare name for unicode ones.
    #[must_use]
    pub fn reaction_key(&self) -> String {
        let name = self.name.as_deref().unwrap_or_default();
        match self.id {
            Some(id) => format!("{name}:{id}"),
            None => name.to_string(),
        }
    }
}

impl Emoji {
    /// Returns the string that renders this emoji in a message.
    #[must_use]
    pub fn mention(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or_default();
        match self.id {
            Some(id) if self.animated => write!(f, "<a:{name}:{id}>"),
            Some(id) => write!(f, "<:{name}:{id}>"),
            None => f.write_str(name),
        }
    }
}

// Unicode emoji have no id and compare by name
impl PartialEq for Emoji {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.name == other.name,
            _ => false,
        }
    }
}

impl Eq for Emoji {}
