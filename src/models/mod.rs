//! Typed Discord entities returned by the resource clients.
//!
//! Every model deserializes from the JSON the API returns and tolerates
//! missing optional fields. Entities with an id compare and hash by that id
//! alone, so a refetched copy of the same user equals the stale one.
//!
//! # Example
//!
//! ```rust
//! use restcord::models::{Identified, User};
//!
//! let user: User = serde_json::from_str(
//!     r#"{"id": "80351110224678912", "username": "Nelly", "discriminator": "1337"}"#,
//! ).unwrap();
//!
//! assert_eq!(user.id().get(), 80_351_110_224_678_912);
//! assert_eq!(user.mention(), "<@80351110224678912>");
//! ```

mod ban;
mod channel;
mod emoji;
mod guild;
mod invite;
mod message;
mod permissions;
mod role;
mod snowflake;
mod user;
mod voice;
mod webhook;

pub use ban::Ban;
pub use channel::{Channel, ChannelType};
pub use emoji::Emoji;
pub use guild::{Guild, GuildPreview};
pub use invite::Invite;
pub use message::Message;
pub use permissions::{OverwriteType, PermissionOverwrite, Permissions};
pub use role::Role;
pub use snowflake::{Snowflake, DISCORD_EPOCH_MS};
pub use user::{Member, User};
pub use voice::VoiceRegion;
pub use webhook::Webhook;

/// An entity named by a [`Snowflake`].
pub trait Identified {
    /// Returns the entity's id.
    fn id(&self) -> Snowflake;

    /// Returns the time at which the entity was created.
    fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.id().created_at()
    }
}

/// Implements [`Identified`], `PartialEq`, `Eq` and `Hash` by the `id` field.
macro_rules! identified_by_id {
    ($($model:ty),+ $(,)?) => {
        $(
            impl $crate::models::Identified for $model {
                fn id(&self) -> $crate::models::Snowflake {
                    self.id
                }
            }

            impl PartialEq for $model {
                fn eq(&self, other: &Self) -> bool {
                    self.id == other.id
                }
            }

            impl Eq for $model {}

            impl std::hash::Hash for $model {
                fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                    std::hash::Hash::hash(&self.id, state);
                }
            }
        )+
    };
}

identified_by_id!(
    User,
    Guild,
    GuildPreview,
    Channel,
    PermissionOverwrite,
    Message,
    Role,
    Webhook,
);

impl std::hash::Hash for Member {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&self.user.id, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_identified_models_dedupe_in_sets() {
        let roles: Vec<Role> = serde_json::from_value(json!([
            {"id": "1", "name": "admin"},
            {"id": "1", "name": "renamed admin"},
            {"id": "2", "name": "mod"}
        ]))
        .unwrap();

        let unique: HashSet<Role> = roles.into_iter().collect();
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_created_at_comes_from_id() {
        let user: User =
            serde_json::from_value(json!({"id": "175928847299117063", "username": "x"})).unwrap();

        assert_eq!(user.created_at().timestamp_millis(), 1_462_015_105_796);
    }
}
