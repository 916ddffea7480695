//! Channel events.

use serde::Deserialize;

use super::Snowflake;

/// A channel was created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelCreated {
    /// The new channel's id.
    pub id: Snowflake,
    /// The owning guild, absent for direct-message channels.
    pub guild_id: Option<Snowflake>,
    /// The channel name, absent for direct-message channels.
    pub name: Option<String>,
}

/// A channel's settings changed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelUpdated {
    /// The channel's id.
    pub id: Snowflake,
    /// The owning guild, absent for direct-message channels.
    pub guild_id: Option<Snowflake>,
    /// The (possibly new) channel name.
    pub name: Option<String>,
}

/// A channel was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelDeleted {
    /// The deleted channel's id.
    pub id: Snowflake,
    /// The owning guild, absent for direct-message channels.
    pub guild_id: Option<Snowflake>,
}

/// A message was pinned or unpinned in a channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelPinsUpdated {
    /// The channel whose pins changed.
    pub channel_id: Snowflake,
    /// The owning guild, absent for direct-message channels.
    pub guild_id: Option<Snowflake>,
    /// When the most recent pin was made, absent if the last pin was removed.
    pub last_pin_timestamp: Option<String>,
}

accord_core::events! {
    ChannelCreated => ("CHANNEL_CREATE", Channel),
    ChannelUpdated => ("CHANNEL_UPDATE", Channel),
    ChannelDeleted => ("CHANNEL_DELETE", Channel),
    ChannelPinsUpdated => ("CHANNEL_PINS_UPDATE", Channel),
}
