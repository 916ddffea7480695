//! Guild events: guild lifecycle, bans, members and roles.

use serde::Deserialize;

use super::{Snowflake, UserRef};

/// The role fragment carried by role events.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleRef {
    /// The role's id.
    pub id: Snowflake,
    /// The role's name.
    pub name: Option<String>,
}

/// The client joined a guild, or an offline guild became available.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildCreated {
    /// The guild's id.
    pub id: Snowflake,
    /// The guild's name.
    pub name: Option<String>,
}

/// A guild's settings changed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildUpdated {
    /// The guild's id.
    pub id: Snowflake,
    /// The (possibly new) guild name.
    pub name: Option<String>,
}

/// The client left a guild, or the guild became unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildDeleted {
    /// The guild's id.
    pub id: Snowflake,
    /// True when the guild went offline rather than removing the client.
    #[serde(default)]
    pub unavailable: bool,
}

/// A user was banned from a guild.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildBanAdded {
    /// The guild the ban applies to.
    pub guild_id: Snowflake,
    /// The banned user.
    pub user: UserRef,
}

/// A user's ban was lifted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildBanRemoved {
    /// The guild the ban applied to.
    pub guild_id: Snowflake,
    /// The unbanned user.
    pub user: UserRef,
}

/// A user joined a guild.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildMemberAdded {
    /// The guild joined.
    pub guild_id: Snowflake,
    /// The joining user.
    pub user: UserRef,
}

/// A user left (or was removed from) a guild.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildMemberRemoved {
    /// The guild left.
    pub guild_id: Snowflake,
    /// The departing user.
    pub user: UserRef,
}

/// A guild member's nick or roles changed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildMemberUpdated {
    /// The member's guild.
    pub guild_id: Snowflake,
    /// The member's user.
    pub user: UserRef,
    /// The member's nickname, if set.
    pub nick: Option<String>,
    /// The member's current role ids.
    #[serde(default)]
    pub roles: Vec<Snowflake>,
}

/// A role was created in a guild.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildRoleCreated {
    /// The role's guild.
    pub guild_id: Snowflake,
    /// The new role.
    pub role: RoleRef,
}

/// A role's settings changed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildRoleUpdated {
    /// The role's guild.
    pub guild_id: Snowflake,
    /// The updated role.
    pub role: RoleRef,
}

/// A role was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildRoleDeleted {
    /// The role's guild.
    pub guild_id: Snowflake,
    /// The deleted role's id.
    pub role_id: Snowflake,
}

/// A guild's custom emoji set changed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildEmojisUpdated {
    /// The guild whose emojis changed.
    pub guild_id: Snowflake,
}

/// A guild integration was created, updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildIntegrationsUpdated {
    /// The guild whose integrations changed.
    pub guild_id: Snowflake,
}

/// A chunk of guild members, sent in response to a member request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuildMembersChunk {
    /// The guild the chunk belongs to.
    pub guild_id: Snowflake,
}

accord_core::events! {
    GuildCreated => ("GUILD_CREATE", Guild),
    GuildUpdated => ("GUILD_UPDATE", Guild),
    GuildDeleted => ("GUILD_DELETE", Guild),
    GuildBanAdded => ("GUILD_BAN_ADD", Guild),
    GuildBanRemoved => ("GUILD_BAN_REMOVE", Guild),
    GuildMemberAdded => ("GUILD_MEMBER_ADD", Guild),
    GuildMemberRemoved => ("GUILD_MEMBER_REMOVE", Guild),
    GuildMemberUpdated => ("GUILD_MEMBER_UPDATE", Guild),
    GuildRoleCreated => ("GUILD_ROLE_CREATE", Guild),
    GuildRoleUpdated => ("GUILD_ROLE_UPDATE", Guild),
    GuildRoleDeleted => ("GUILD_ROLE_DELETE", Guild),
    GuildEmojisUpdated => ("GUILD_EMOJIS_UPDATE", Guild),
    GuildIntegrationsUpdated => ("GUILD_INTEGRATIONS_UPDATE", Guild),
    GuildMembersChunk => ("GUILD_MEMBERS_CHUNK", Guild),
}
