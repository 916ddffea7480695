//! Typed gateway event payloads.
//!
//! One flat struct per gateway event, grouped by family. These carry the ids
//! and fields the event itself delivers; resolving them into full domain
//! objects (guilds, channels, users) is the job of higher layers.

mod channel;
mod guild;
mod lifecycle;
mod message;
mod presence;
mod voice;

pub use channel::{ChannelCreated, ChannelDeleted, ChannelPinsUpdated, ChannelUpdated};
pub use guild::{
    GuildBanAdded, GuildBanRemoved, GuildCreated, GuildDeleted, GuildEmojisUpdated,
    GuildIntegrationsUpdated, GuildMemberAdded, GuildMemberRemoved, GuildMemberUpdated,
    GuildMembersChunk, GuildRoleCreated, GuildRoleDeleted, GuildRoleUpdated, GuildUpdated, RoleRef,
};
pub use lifecycle::{InvalidSession, Ready, Reconnect, Resumed};
pub use message::{
    MessageBulkDeleted, MessageCreated, MessageDeleted, MessageUpdated, ReactionAdded,
    ReactionEmoji, ReactionRemoved, ReactionsCleared,
};
pub use presence::{PresenceUpdated, TypingStarted, UserUpdated, WebhooksUpdated};
pub use voice::{VoiceServerUpdated, VoiceStateUpdated};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// Snowflake
// =============================================================================

/// A platform entity id.
///
/// The wire sends ids as decimal strings to avoid precision loss in JSON
/// consumers; deserialization accepts both the string and plain integer
/// forms, serialization always emits the string form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Snowflake(pub u64);

impl std::fmt::Display for Snowflake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for Snowflake {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Snowflake)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SnowflakeVisitor;

        impl<'de> Visitor<'de> for SnowflakeVisitor {
            type Value = Snowflake;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a snowflake id as a string or integer")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Snowflake, E> {
                Ok(Snowflake(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Snowflake, E> {
                u64::try_from(v)
                    .map(Snowflake)
                    .map_err(|_| E::custom(format!("negative snowflake: {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Snowflake, E> {
                v.parse()
                    .map_err(|_| E::custom(format!("invalid snowflake: {v:?}")))
            }
        }

        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

// =============================================================================
// Shared fragments
// =============================================================================

/// The user fragment embedded in ban, member and presence events.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRef {
    /// The user's id.
    pub id: Snowflake,
    /// The user's name, when the gateway includes it.
    pub username: Option<String>,
}
