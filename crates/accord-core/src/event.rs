//! Event identity for the Accord dispatch core.
//!
//! Every concrete event payload type implements [`Event`], which pins two
//! pieces of identity to the type itself:
//!
//! - [`Event::NAME`] - the stable string tag for the event, identical to the
//!   gateway wire name for platform events (e.g. `"MESSAGE_UPDATE"`). Used in
//!   logs and by the gateway routing table.
//! - [`Event::KIND`] - a coarse classification used for filtering and
//!   diagnostics without knowing the concrete type.
//!
//! The dispatcher itself keys its registry by `TypeId`, so two distinct
//! payload types can never share a dispatch slot even if they were
//! (incorrectly) given the same `NAME`.

/// Classification of event types.
///
/// This is the high-level family of an event, useful for filtering and log
/// output without matching on the concrete payload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Message events (created, updated, deleted, reactions).
    Message,
    /// Channel events (created, updated, deleted, pins).
    Channel,
    /// Guild events (guild, member, role, ban changes).
    Guild,
    /// Presence and user events (presence, typing, user updates).
    Presence,
    /// Gateway lifecycle events (ready, resumed, reconnect).
    Lifecycle,
    /// Voice events (voice state and voice server changes).
    Voice,
    /// Other/unknown event types.
    Other,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventKind::Message => "message",
            EventKind::Channel => "channel",
            EventKind::Guild => "guild",
            EventKind::Presence => "presence",
            EventKind::Lifecycle => "lifecycle",
            EventKind::Voice => "voice",
            EventKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// The base trait for all dispatchable event payloads.
///
/// Implementors are plain data types describing something that happened on
/// the platform. Subscription and dispatch are keyed by the concrete type;
/// `NAME` is the human-readable tag that shows up in logs and on the wire.
///
/// # Example
///
/// ```rust,ignore
/// use accord_core::{Event, EventKind};
///
/// #[derive(Clone)]
/// struct MessageUpdated {
///     id: u64,
///     content: String,
/// }
///
/// impl Event for MessageUpdated {
///     const NAME: &'static str = "MESSAGE_UPDATE";
///     const KIND: EventKind = EventKind::Message;
/// }
/// ```
///
/// The [`events!`](crate::events) macro generates these impls for whole
/// batches of payload types.
pub trait Event: Send + Sync + 'static {
    /// The stable string tag for this event type.
    ///
    /// Two distinct event types should never share a `NAME`; for gateway
    /// events this is the wire event name.
    const NAME: &'static str;

    /// The high-level classification of this event type.
    const KIND: EventKind = EventKind::Other;
}

/// Implements [`Event`] for a batch of payload types.
///
/// ```rust,ignore
/// accord_core::events! {
///     MessageUpdated => ("MESSAGE_UPDATE", Message),
///     GuildUpdated => ("GUILD_UPDATE", Guild),
/// }
/// ```
#[macro_export]
macro_rules! events {
    ($($ty:ty => ($name:literal, $kind:ident)),+ $(,)?) => {
        $(
            impl $crate::Event for $ty {
                const NAME: &'static str = $name;
                const KIND: $crate::EventKind = $crate::EventKind::$kind;
            }
        )+
    };
}
