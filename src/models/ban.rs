use serde::{Deserialize, Serialize};

use super::User;

/// A guild ban.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ban {
    /// Why the user was banned, if a reason was given.
    #[serde(default)]
    pub reason: Option<String>,
    /// The banned user.
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ban_deserialization() {
        let json = r#"{
            "reason": "mentioning b1nzy",
            "user": {"id": "53908232506183680", "username": "Mason", "discriminator": "9999"}
        }"#;

        let ban: Ban = serde_json::from_str(json).unwrap();

        assert_eq!(ban.reason.as_deref(), Some("mentioning b1nzy"));
        assert_eq!(ban.user.username, "Mason");
    }
}
