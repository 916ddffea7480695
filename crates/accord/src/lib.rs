//! # Accord
//!
//! A typed, dispatch-centric client library for chat-platform gateways.
//!
//! Accord is built around one idea: the gateway pushes events, and your code
//! subscribes typed callbacks to exactly the events it cares about.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌───────────┐
//! │  Transport  │────▶│ EventDispatcher │────▶│  Handler  │
//! │  (gateway)  │     │                 │────▶│  Handler  │
//! └─────────────┘     └─────────────────┘────▶│  Handler  │
//!                                             └───────────┘
//! ```
//!
//! - [`accord-core`](accord_core): the dispatch core - [`EventDispatcher`],
//!   [`EventHandler`], [`ListenerHandle`], the [`Event`] identity trait.
//! - [`accord-gateway`](accord_gateway): typed gateway payloads, the frame
//!   [`GatewayRouter`] and the async [`GatewayPump`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use accord::prelude::*;
//!
//! let dispatcher = Arc::new(EventDispatcher::new());
//!
//! let handle = dispatcher.subscribe(EventHandler::by_ref(|ev: &MessageUpdated| {
//!     if ev.edited() {
//!         println!("message {} edited: {:?}", ev.id, ev.content);
//!     }
//! }));
//!
//! let router = GatewayRouter::new(Arc::clone(&dispatcher));
//! // feed frames from your transport:
//! router.handle_frame(frame)?;
//!
//! dispatcher.unsubscribe(&handle);
//! ```

pub mod logging;

pub use accord_core::{
    CallbackKind, DispatchError, DispatchOutcome, DispatchResult, Event, EventDispatcher,
    EventHandler, EventKind, FailurePolicy, HandlerError, HandlerOutcome, IntoHandlerOutcome,
    ListenerHandle,
};

pub use accord_gateway::{GatewayError, GatewayPump, GatewayResult, GatewayRouter};

/// Typed gateway event payloads.
pub mod events {
    pub use accord_gateway::{
        ChannelCreated, ChannelDeleted, ChannelPinsUpdated, ChannelUpdated, GuildBanAdded,
        GuildBanRemoved, GuildCreated, GuildDeleted, GuildEmojisUpdated, GuildIntegrationsUpdated,
        GuildMemberAdded, GuildMemberRemoved, GuildMemberUpdated, GuildMembersChunk,
        GuildRoleCreated, GuildRoleDeleted, GuildRoleUpdated, GuildUpdated, InvalidSession,
        MessageBulkDeleted, MessageCreated, MessageDeleted, MessageUpdated, PresenceUpdated,
        ReactionAdded, ReactionEmoji, ReactionRemoved, ReactionsCleared, Ready, Reconnect,
        Resumed, RoleRef, Snowflake, TypingStarted, UserRef, UserUpdated, VoiceServerUpdated,
        VoiceStateUpdated, WebhooksUpdated,
    };
}

/// Prelude for common imports.
pub mod prelude {
    pub use super::events::*;
    pub use super::{
        Event, EventDispatcher, EventHandler, EventKind, FailurePolicy, GatewayPump,
        GatewayRouter, HandlerError, ListenerHandle,
    };
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::prelude::*;

    #[test]
    fn prelude_covers_the_subscribe_and_route_flow() {
        let dispatcher = Arc::new(EventDispatcher::new());
        let renames = Arc::new(AtomicUsize::new(0));

        let r = Arc::clone(&renames);
        let handle = dispatcher.subscribe(EventHandler::by_ref(move |ev: &GuildUpdated| {
            assert_eq!(ev.name.as_deref(), Some("renamed"));
            r.fetch_add(1, Ordering::SeqCst);
        }));

        let router = GatewayRouter::new(Arc::clone(&dispatcher));
        router
            .handle_frame(r#"{"t":"GUILD_UPDATE","s":1,"d":{"id":"3","name":"renamed"}}"#)
            .unwrap();
        assert_eq!(renames.load(Ordering::SeqCst), 1);

        assert!(dispatcher.unsubscribe(&handle));
    }
}
