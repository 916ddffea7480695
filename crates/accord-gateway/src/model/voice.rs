//! Voice events: per-user voice state and voice server assignment.

use serde::Deserialize;

use super::Snowflake;

/// A user joined, left or moved between voice channels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoiceStateUpdated {
    /// The guild the voice channel belongs to, when applicable.
    pub guild_id: Option<Snowflake>,
    /// The voice channel, or `None` when the user disconnected.
    pub channel_id: Option<Snowflake>,
    /// The user whose state changed.
    pub user_id: Snowflake,
}

/// The guild's voice server changed and the client must reconnect to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoiceServerUpdated {
    /// The guild being assigned a voice server.
    pub guild_id: Snowflake,
    /// The new voice server host, or `None` while one is being allocated.
    pub endpoint: Option<String>,
}

accord_core::events! {
    VoiceStateUpdated => ("VOICE_STATE_UPDATE", Voice),
    VoiceServerUpdated => ("VOICE_SERVER_UPDATE", Voice),
}
