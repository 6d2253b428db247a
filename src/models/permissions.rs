//! Permission bit sets and channel permission overwrites.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::snowflake::{Snowflake, StringOrU64Visitor};

/// A permission bit set.
///
/// Older API versions send permissions as integers and newer ones as
/// decimal strings; both are accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Permissions(u64);

impl Permissions {
    /// Allows kicking members.
    pub const KICK_MEMBERS: Self = Self(1 << 1);
    /// Allows banning members.
    pub const BAN_MEMBERS: Self = Self(1 << 2);
    /// Grants every permission.
    pub const ADMINISTRATOR: Self = Self(1 << 3);
    /// Allows managing and deleting channels.
    pub const MANAGE_CHANNELS: Self = Self(1 << 4);
    /// Allows creating reactions.
    pub const ADD_REACTIONS: Self = Self(1 << 6);
    /// Allows reading messages.
    pub const VIEW_CHANNEL: Self = Self(1 << 10);
    /// Allows sending messages.
    pub const SEND_MESSAGES: Self = Self(1 << 11);
    /// Allows deleting other users' messages.
    pub const MANAGE_MESSAGES: Self = Self(1 << 13);

    /// Wraps raw permission bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw permission bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_any(StringOrU64Visitor("a permission bit set"))
            .map(Self)
    }
}

/// What a permission overwrite applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverwriteType {
    /// The overwrite applies to a role.
    Role,
    /// The overwrite applies to a single member.
    Member,
}

impl Serialize for OverwriteType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            Self::Role => "role",
            Self::Member => "member",
        })
    }
}

impl<'de> Deserialize<'de> for OverwriteType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OverwriteTypeVisitor)
    }
}

// Older API versions use "role"/"member", newer ones 0/1
struct OverwriteTypeVisitor;

impl<'de> Visitor<'de> for OverwriteTypeVisitor {
    type Value = OverwriteType;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("\"role\", \"member\", 0 or 1")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<OverwriteType, E> {
        match value {
            0 => Ok(OverwriteType::Role),
            1 => Ok(OverwriteType::Member),
            _ => Err(E::invalid_value(de::Unexpected::Unsigned(value), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<OverwriteType, E> {
        match value {
            "role" => Ok(OverwriteType::Role),
            "member" => Ok(OverwriteType::Member),
            _ => Err(E::invalid_value(de::Unexpected::Str(value), &self)),
        }
    }
}

/// Explicit permission grants and denials for a role or member in a channel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PermissionOverwrite {
    /// The role or member id.
    pub id: Snowflake,
    /// Whether `id` names a role or a member.
    #[serde(rename = "type")]
    pub kind: OverwriteType,
    /// Permissions granted.
    #[serde(default)]
    pub allow: Permissions,
    /// Permissions denied.
    #[serde(default)]
    pub deny: Permissions,
}
