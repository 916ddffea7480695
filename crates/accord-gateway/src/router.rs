//! Routing of raw gateway frames to typed dispatch.
//!
//! The gateway delivers frames as JSON envelopes:
//!
//! ```json
//! { "t": "MESSAGE_UPDATE", "s": 42, "d": { ...payload... } }
//! ```
//!
//! [`GatewayRouter`] holds a table keyed by the wire event name (`t`); each
//! entry decodes the `d` payload into its typed struct and dispatches it on
//! the shared [`EventDispatcher`]. Frames without an event name (opcode-only
//! traffic) and frames for event names the table does not know are skipped,
//! not errors - the platform adds event types faster than clients update.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use accord_core::{DispatchOutcome, Event, EventDispatcher};

use crate::error::{GatewayError, GatewayResult};
use crate::model::*;

type Route = Box<dyn Fn(&EventDispatcher, Value) -> GatewayResult<DispatchOutcome> + Send + Sync>;

#[derive(Deserialize)]
struct Envelope {
    t: Option<String>,
    s: Option<i64>,
    #[serde(default)]
    d: Value,
}

/// Decodes incoming gateway frames and feeds them to the dispatcher.
///
/// A new router comes with every standard platform event bound; additional
/// event types can be bound with [`bind`](Self::bind).
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use accord_core::{EventDispatcher, EventHandler};
/// use accord_gateway::{GatewayRouter, MessageUpdated};
///
/// let dispatcher = Arc::new(EventDispatcher::new());
/// dispatcher.subscribe(EventHandler::by_ref(|ev: &MessageUpdated| {
///     println!("message {} changed", ev.id);
/// }));
///
/// let router = GatewayRouter::new(Arc::clone(&dispatcher));
/// router.handle_frame(r#"{"t":"MESSAGE_UPDATE","s":1,"d":{"id":"1","channel_id":"2"}}"#)?;
/// ```
pub struct GatewayRouter {
    dispatcher: Arc<EventDispatcher>,
    routes: HashMap<&'static str, Route>,
    last_sequence: AtomicI64,
}

impl GatewayRouter {
    /// Creates a router over `dispatcher` with all standard events bound.
    pub fn new(dispatcher: Arc<EventDispatcher>) -> Self {
        let mut router = Self {
            dispatcher,
            routes: HashMap::new(),
            last_sequence: AtomicI64::new(-1),
        };
        router.bind_events();
        router
    }

    /// Binds event type `T` under its wire name.
    ///
    /// Frames whose `t` equals `T::NAME` will decode `d` into `T` and
    /// dispatch it. Binding the same name again replaces the previous route.
    pub fn bind<T>(&mut self)
    where
        T: Event + Clone + DeserializeOwned,
    {
        self.routes.insert(
            T::NAME,
            Box::new(|dispatcher, data| {
                let payload: T = serde_json::from_value(data).map_err(|source| {
                    GatewayError::Decode {
                        event: T::NAME,
                        source,
                    }
                })?;
                Ok(dispatcher.dispatch(payload)?)
            }),
        );
    }

    fn bind_events(&mut self) {
        self.bind::<Ready>();
        self.bind::<Resumed>();
        self.bind::<Reconnect>();
        self.bind::<InvalidSession>();
        self.bind::<ChannelCreated>();
        self.bind::<ChannelUpdated>();
        self.bind::<ChannelDeleted>();
        self.bind::<ChannelPinsUpdated>();
        self.bind::<GuildCreated>();
        self.bind::<GuildUpdated>();
        self.bind::<GuildDeleted>();
        self.bind::<GuildBanAdded>();
        self.bind::<GuildBanRemoved>();
        self.bind::<GuildMemberAdded>();
        self.bind::<GuildMemberRemoved>();
        self.bind::<GuildMemberUpdated>();
        self.bind::<GuildRoleCreated>();
        self.bind::<GuildRoleUpdated>();
        self.bind::<GuildRoleDeleted>();
        self.bind::<GuildEmojisUpdated>();
        self.bind::<GuildIntegrationsUpdated>();
        self.bind::<GuildMembersChunk>();
        self.bind::<MessageCreated>();
        self.bind::<MessageUpdated>();
        self.bind::<MessageDeleted>();
        self.bind::<MessageBulkDeleted>();
        self.bind::<ReactionAdded>();
        self.bind::<ReactionRemoved>();
        self.bind::<ReactionsCleared>();
        self.bind::<PresenceUpdated>();
        self.bind::<TypingStarted>();
        self.bind::<UserUpdated>();
        self.bind::<WebhooksUpdated>();
        self.bind::<VoiceStateUpdated>();
        self.bind::<VoiceServerUpdated>();
    }

    /// Handles one raw gateway frame.
    ///
    /// Returns `Ok(Some(outcome))` when the frame was routed to a bound
    /// event, `Ok(None)` when it carried no event name or an unbound one.
    pub fn handle_frame(&self, frame: &str) -> GatewayResult<Option<DispatchOutcome>> {
        let envelope: Envelope =
            serde_json::from_str(frame).map_err(|err| GatewayError::Envelope {
                reason: err.to_string(),
            })?;
        self.handle_envelope(envelope)
    }

    /// The sequence number of the most recent sequenced frame, or -1.
    ///
    /// Used by the transport when heartbeating and resuming.
    pub fn last_sequence(&self) -> i64 {
        self.last_sequence.load(Ordering::SeqCst)
    }

    /// The dispatcher this router feeds.
    pub fn dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.dispatcher
    }

    fn handle_envelope(&self, envelope: Envelope) -> GatewayResult<Option<DispatchOutcome>> {
        self.last_sequence
            .store(envelope.s.unwrap_or(-1), Ordering::SeqCst);

        let Some(name) = envelope.t else {
            trace!("Frame without event name, skipping");
            return Ok(None);
        };

        let Some(route) = self.routes.get(name.as_str()) else {
            debug!(event = %name, "No route for event, skipping");
            return Ok(None);
        };

        // Lifecycle events arrive with a null payload; decode from an
        // empty object instead.
        let data = match envelope.d {
            Value::Null => Value::Object(serde_json::Map::new()),
            data => data,
        };

        route(&self.dispatcher, data).map(Some)
    }
}

impl std::fmt::Debug for GatewayRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayRouter")
            .field("routes", &self.routes.len())
            .field("last_sequence", &self.last_sequence())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accord_core::EventHandler;
    use parking_lot::Mutex;

    fn router_with_dispatcher() -> (GatewayRouter, Arc<EventDispatcher>) {
        let dispatcher = Arc::new(EventDispatcher::new());
        let router = GatewayRouter::new(Arc::clone(&dispatcher));
        (router, dispatcher)
    }

    #[test]
    fn message_update_reaches_typed_subscriber() {
        let (router, dispatcher) = router_with_dispatcher();
        let seen: Arc<Mutex<Option<MessageUpdated>>> = Arc::default();

        let s = Arc::clone(&seen);
        dispatcher.subscribe(EventHandler::by_value(move |ev: MessageUpdated| {
            *s.lock() = Some(ev);
        }));

        let outcome = router
            .handle_frame(
                r#"{"t":"MESSAGE_UPDATE","s":7,"d":{
                    "id":"100","channel_id":"200","content":"edited text",
                    "edited_timestamp":"2020-05-01T12:00:00Z"}}"#,
            )
            .unwrap()
            .unwrap();

        assert_eq!(outcome.delivered, 1);
        let ev = seen.lock().take().unwrap();
        assert_eq!(ev.id, Snowflake(100));
        assert_eq!(ev.content.as_deref(), Some("edited text"));
        assert!(ev.edited());
    }

    #[test]
    fn routing_is_type_isolated() {
        let (router, dispatcher) = router_with_dispatcher();
        let guild_updates = Arc::new(std::sync::atomic::AtomicUsize::new(0));

        let g = Arc::clone(&guild_updates);
        dispatcher.subscribe(EventHandler::by_ref(move |_: &GuildUpdated| {
            g.fetch_add(1, Ordering::SeqCst);
        }));

        router
            .handle_frame(r#"{"t":"MESSAGE_UPDATE","s":1,"d":{"id":"1","channel_id":"2"}}"#)
            .unwrap();
        assert_eq!(guild_updates.load(Ordering::SeqCst), 0);

        router
            .handle_frame(r#"{"t":"GUILD_UPDATE","s":2,"d":{"id":"3","name":"renamed"}}"#)
            .unwrap();
        assert_eq!(guild_updates.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_event_is_skipped() {
        let (router, _dispatcher) = router_with_dispatcher();
        let outcome = router
            .handle_frame(r#"{"t":"SOMETHING_NEW","s":3,"d":{}}"#)
            .unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn frame_without_event_name_is_skipped() {
        let (router, _dispatcher) = router_with_dispatcher();
        let outcome = router.handle_frame(r#"{"op":11}"#).unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn malformed_envelope_is_an_error() {
        let (router, _dispatcher) = router_with_dispatcher();
        let err = router.handle_frame("not json at all").unwrap_err();
        assert!(matches!(err, GatewayError::Envelope { .. }));
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let (router, _dispatcher) = router_with_dispatcher();
        let err = router
            .handle_frame(r#"{"t":"MESSAGE_UPDATE","s":4,"d":{"id":true}}"#)
            .unwrap_err();
        match err {
            GatewayError::Decode { event, .. } => assert_eq!(event, "MESSAGE_UPDATE"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn sequence_number_is_tracked() {
        let (router, _dispatcher) = router_with_dispatcher();
        assert_eq!(router.last_sequence(), -1);

        router
            .handle_frame(r#"{"t":"TYPING_START","s":41,"d":{"user_id":"1","channel_id":"2","timestamp":0}}"#)
            .unwrap();
        assert_eq!(router.last_sequence(), 41);

        // Unsequenced frames reset the counter, matching gateway semantics
        // where only dispatch frames carry a sequence.
        router.handle_frame(r#"{"op":11}"#).unwrap();
        assert_eq!(router.last_sequence(), -1);
    }

    #[test]
    fn voice_and_guild_maintenance_events_are_routed() {
        let (router, dispatcher) = router_with_dispatcher();
        let voice: Arc<Mutex<Option<VoiceStateUpdated>>> = Arc::default();

        let v = Arc::clone(&voice);
        dispatcher.subscribe(EventHandler::by_value(move |ev: VoiceStateUpdated| {
            *v.lock() = Some(ev);
        }));

        let frames = [
            r#"{"t":"GUILD_EMOJIS_UPDATE","s":10,"d":{"guild_id":"1"}}"#,
            r#"{"t":"GUILD_INTEGRATIONS_UPDATE","s":11,"d":{"guild_id":"1"}}"#,
            r#"{"t":"GUILD_MEMBERS_CHUNK","s":12,"d":{"guild_id":"1"}}"#,
            r#"{"t":"VOICE_STATE_UPDATE","s":13,"d":{"guild_id":"1","channel_id":null,"user_id":"9"}}"#,
            r#"{"t":"VOICE_SERVER_UPDATE","s":14,"d":{"guild_id":"1","endpoint":"voice.example.gg"}}"#,
        ];
        for frame in frames {
            assert!(router.handle_frame(frame).unwrap().is_some(), "{frame}");
        }

        let ev = voice.lock().take().unwrap();
        assert_eq!(ev.user_id, Snowflake(9));
        assert!(ev.channel_id.is_none());
    }

    #[test]
    fn boolean_payload_invalid_session_dispatches() {
        let (router, dispatcher) = router_with_dispatcher();
        let seen: Arc<Mutex<Option<InvalidSession>>> = Arc::default();

        let s = Arc::clone(&seen);
        dispatcher.subscribe(EventHandler::by_value(move |ev: InvalidSession| {
            *s.lock() = Some(ev);
        }));

        router
            .handle_frame(r#"{"t":"INVALID_SESSION","s":6,"d":true}"#)
            .unwrap();
        assert!(seen.lock().take().unwrap().resumable);

        router
            .handle_frame(r#"{"t":"INVALID_SESSION","s":7,"d":false}"#)
            .unwrap();
        assert!(!seen.lock().take().unwrap().resumable);
    }

    #[test]
    fn null_payload_lifecycle_event_dispatches() {
        let (router, dispatcher) = router_with_dispatcher();
        let resumed = Arc::new(std::sync::atomic::AtomicUsize::new(0));

        let r = Arc::clone(&resumed);
        dispatcher.subscribe(EventHandler::by_ref(move |_: &Resumed| {
            r.fetch_add(1, Ordering::SeqCst);
        }));

        router
            .handle_frame(r#"{"t":"RESUMED","s":5,"d":null}"#)
            .unwrap();
        assert_eq!(resumed.load(Ordering::SeqCst), 1);
    }
}
