use serde::{Deserialize, Serialize};

use super::{Permissions, Snowflake};

/// A guild role.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Role {
    /// The role id.
    pub id: Snowflake,
    /// The role name.
    pub name: String,
    /// RGB colour, or 0 for none.
    #[serde(default)]
    pub color: u32,
    /// Whether the role is shown separately in the member list.
    #[serde(default)]
    pub hoist: bool,
    /// Position in the role hierarchy.
    #[serde(default)]
    pub position: i32,
    /// Permissions granted by the role.
    #[serde(default)]
    pub permissions: Permissions,
    /// Whether the role is managed by an integration.
    #[serde(default)]
    pub managed: bool,
    /// Whether the role can be mentioned.
    #[serde(default)]
    pub mentionable: bool,
}

impl Role {
    /// Returns the string that mentions this role in a message.
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_deserialization() {
        let json = r#"{
            "id": "41771983423143936",
            "name": "WE DEM BOYZZ!!!!!!",
            "color": 3447003,
            "hoist": true,
            "position": 1,
            "permissions": "66321471",
            "managed": false,
            "mentionable": false
        }"#;

        let role: Role = serde_json::from_str(json).unwrap();

        assert_eq!(role.id, Snowflake::new(41_771_983_423_143_936));
        assert_eq!(role.color, 3_447_003);
        assert!(role.hoist);
        assert_eq!(role.permissions.bits(), 66_321_471);
        assert_eq!(role.mention(), "<@&41771983423143936>");
    }
}
