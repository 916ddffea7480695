//! Presence, typing, user and webhook events.

use serde::Deserialize;

use super::{Snowflake, UserRef};

/// A user's presence changed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PresenceUpdated {
    /// The user whose presence changed.
    pub user: UserRef,
    /// The guild the presence applies to.
    pub guild_id: Option<Snowflake>,
    /// The new status ("online", "idle", "dnd", "offline").
    pub status: Option<String>,
}

/// A user started typing in a channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypingStarted {
    /// The typing user.
    pub user_id: Snowflake,
    /// The channel being typed in.
    pub channel_id: Snowflake,
    /// Unix timestamp of when typing started.
    pub timestamp: i64,
}

/// The client user's own profile changed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserUpdated {
    /// The user's id.
    pub id: Snowflake,
    /// The user's name.
    pub username: Option<String>,
}

/// A channel's webhooks were created, updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhooksUpdated {
    /// The webhooks' guild.
    pub guild_id: Snowflake,
    /// The channel whose webhooks changed.
    pub channel_id: Snowflake,
}

accord_core::events! {
    PresenceUpdated => ("PRESENCE_UPDATE", Presence),
    TypingStarted => ("TYPING_START", Presence),
    UserUpdated => ("USER_UPDATE", Presence),
    WebhooksUpdated => ("WEBHOOKS_UPDATE", Channel),
}
