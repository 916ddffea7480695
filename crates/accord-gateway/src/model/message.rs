//! Message events: creation, edits, deletion and reactions.

use serde::Deserialize;

use super::Snowflake;

/// A new message was posted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageCreated {
    /// The message id.
    pub id: Snowflake,
    /// The channel the message was posted in.
    pub channel_id: Snowflake,
    /// The guild the channel belongs to, absent for direct messages.
    pub guild_id: Option<Snowflake>,
    /// The message text.
    #[serde(default)]
    pub content: String,
}

/// An existing message changed.
///
/// Embed unfurling also arrives as an update; [`edited`](Self::edited)
/// distinguishes a user edit from such server-side updates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageUpdated {
    /// The message id.
    pub id: Snowflake,
    /// The channel the message lives in.
    pub channel_id: Snowflake,
    /// The guild the channel belongs to, absent for direct messages.
    pub guild_id: Option<Snowflake>,
    /// The new message text, when it changed.
    pub content: Option<String>,
    /// When the author edited the message, if they did.
    pub edited_timestamp: Option<String>,
}

impl MessageUpdated {
    /// Whether the update was a user edit rather than a server-side change.
    pub fn edited(&self) -> bool {
        self.edited_timestamp.is_some()
    }
}

/// A message was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageDeleted {
    /// The deleted message's id.
    pub id: Snowflake,
    /// The channel the message lived in.
    pub channel_id: Snowflake,
    /// The guild the channel belongs to, absent for direct messages.
    pub guild_id: Option<Snowflake>,
}

/// Several messages were deleted at once.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageBulkDeleted {
    /// The deleted message ids.
    pub ids: Vec<Snowflake>,
    /// The channel the messages lived in.
    pub channel_id: Snowflake,
    /// The guild the channel belongs to, absent for direct messages.
    pub guild_id: Option<Snowflake>,
}

/// The emoji fragment carried by reaction events.
///
/// Custom emoji have an id and a name; unicode emoji have only the name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactionEmoji {
    /// The custom emoji id, absent for unicode emoji.
    pub id: Option<Snowflake>,
    /// The emoji name or unicode character.
    pub name: Option<String>,
}

/// A reaction was added to a message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactionAdded {
    /// The message reacted to.
    pub message_id: Snowflake,
    /// The channel the message lives in.
    pub channel_id: Snowflake,
    /// The reacting user.
    pub user_id: Snowflake,
    /// The emoji used.
    pub emoji: ReactionEmoji,
}

/// A reaction was removed from a message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactionRemoved {
    /// The message the reaction was removed from.
    pub message_id: Snowflake,
    /// The channel the message lives in.
    pub channel_id: Snowflake,
    /// The user whose reaction was removed.
    pub user_id: Snowflake,
    /// The emoji removed.
    pub emoji: ReactionEmoji,
}

/// All reactions were cleared from a message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactionsCleared {
    /// The message whose reactions were cleared.
    pub message_id: Snowflake,
    /// The channel the message lives in.
    pub channel_id: Snowflake,
}

accord_core::events! {
    MessageCreated => ("MESSAGE_CREATE", Message),
    MessageUpdated => ("MESSAGE_UPDATE", Message),
    MessageDeleted => ("MESSAGE_DELETE", Message),
    MessageBulkDeleted => ("MESSAGE_DELETE_BULK", Message),
    ReactionAdded => ("MESSAGE_REACTION_ADD", Message),
    ReactionRemoved => ("MESSAGE_REACTION_REMOVE", Message),
    ReactionsCleared => ("MESSAGE_REACTION_REMOVE_ALL", Message),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_edited_flag_follows_timestamp() {
        let edited: MessageUpdated = serde_json::from_str(
            r#"{"id":"1","channel_id":"2","content":"new","edited_timestamp":"2020-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(edited.edited());

        let unfurl: MessageUpdated =
            serde_json::from_str(r#"{"id":"1","channel_id":"2"}"#).unwrap();
        assert!(!unfurl.edited());
        assert_eq!(unfurl.content, None);
    }

    #[test]
    fn reaction_emoji_unicode_has_no_id() {
        let added: ReactionAdded = serde_json::from_str(
            r#"{"message_id":"1","channel_id":"2","user_id":"3","emoji":{"id":null,"name":"👍"}}"#,
        )
        .unwrap();
        assert!(added.emoji.id.is_none());
        assert_eq!(added.emoji.name.as_deref(), Some("👍"));
    }
}
