use serde::{Deserialize, Serialize};

/// A voice server region.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceRegion {
    /// The region id.
    pub id: String,
    /// The region name.
    pub name: String,
    /// Whether the region is for VIP servers only.
    #[serde(default)]
    pub vip: bool,
    /// Whether the region is closest to the current user.
    #[serde(default)]
    pub optimal: bool,
    /// Whether the region is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Whether the region is custom, used for events.
    #[serde(default)]
    pub custom: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_region_deserialization() {
        let json = r#"[
            {"id": "us-west", "name": "US West", "vip": false, "optimal": true, "deprecated": false, "custom": false},
            {"id": "amsterdam", "name": "Amsterdam", "deprecated": true}
        ]"#;

        let regions: Vec<VoiceRegion> = serde_json::from_str(json).unwrap();

        assert_eq!(regions.len(), 2);
        assert!(regions[0].optimal);
        assert_eq!(regions[1].id, "amsterdam");
        assert!(regions[1].deprecated);
        assert!(!regions[1].custom);
    }
}
