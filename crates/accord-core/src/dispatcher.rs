//! The central event dispatcher.
//!
//! [`EventDispatcher`] maps event-type identity to an ordered list of
//! subscribers and fans incoming events out to them synchronously, on the
//! caller's thread. Three operations make up the public contract:
//!
//! - [`subscribe`](EventDispatcher::subscribe) appends a handler to the list
//!   for its event type and returns a [`ListenerHandle`].
//! - [`unsubscribe`](EventDispatcher::unsubscribe) removes exactly the handler
//!   the handle names; stale or foreign handles are a no-op.
//! - [`dispatch`](EventDispatcher::dispatch) invokes every currently
//!   registered handler for the payload's type, in subscription order.
//!
//! # Dispatch-time mutation
//!
//! The registry lock is never held while handlers run: dispatch snapshots the
//! handler list for the event type, releases the lock, then iterates the
//! snapshot. A handler may therefore subscribe or unsubscribe freely during a
//! pass. Handlers subscribed mid-pass are first invoked on the next dispatch;
//! a handler unsubscribed mid-pass that was already snapshotted still runs in
//! the current pass, but never again afterwards.
//!
//! # Failure policy
//!
//! With the default [`FailurePolicy::Isolate`], a failing handler is logged
//! and the pass continues, so one misbehaving subscriber cannot prevent
//! delivery to the rest; the [`DispatchOutcome`] reports how many handlers
//! failed. [`FailurePolicy::Propagate`] fails fast instead: the first handler
//! error aborts the pass and is returned to the dispatch caller.
//!
//! A handler that blocks indefinitely blocks the dispatch call; there is no
//! timeout or cancellation at this layer.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{Level, debug, error, span};

use crate::error::{DispatchError, DispatchResult};
use crate::event::Event;
use crate::handle::ListenerHandle;
use crate::handler::EventHandler;

// =============================================================================
// Failure policy and outcome
// =============================================================================

/// How the dispatcher treats a failing handler mid-pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and continue to the next handler (default).
    ///
    /// Dispatch always delivers to every registered handler; failures are
    /// counted in the [`DispatchOutcome`].
    #[default]
    Isolate,
    /// Abort the pass at the first failing handler and return its error.
    Propagate,
}

/// Summary of one dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Handlers that ran to completion.
    pub delivered: usize,
    /// Handlers that returned an error (always zero under
    /// [`FailurePolicy::Propagate`], which aborts instead).
    pub failed: usize,
}

impl DispatchOutcome {
    /// Whether every invoked handler succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

// =============================================================================
// Type-erased handler storage
// =============================================================================

type Slots<T> = Vec<(u64, Arc<EventHandler<T>>)>;

/// One per-event-type handler list, erased so lists for different event types
/// can live in the same registry map.
trait HandlerList: Send {
    fn remove(&mut self, slot: u64) -> bool;
    fn len(&self) -> usize;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Event + Clone> HandlerList for Slots<T> {
    fn remove(&mut self, slot: u64) -> bool {
        let before = self.len();
        self.retain(|(id, _)| *id != slot);
        self.len() != before
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// =============================================================================
// EventDispatcher
// =============================================================================

static NEXT_DISPATCHER_ID: AtomicU64 = AtomicU64::new(1);

/// The registry mapping event types to ordered handler lists.
///
/// `EventDispatcher` is `Send + Sync`; subscribe, unsubscribe and dispatch all
/// take `&self` and may be called from any thread. Registry mutation and
/// iteration are mutually exclusive, but handler execution happens outside
/// the registry lock (see the module docs).
///
/// # Example
///
/// ```rust,ignore
/// use accord_core::{EventDispatcher, EventHandler};
///
/// let dispatcher = EventDispatcher::new();
///
/// let handle = dispatcher.subscribe(EventHandler::by_ref(|ev: &MessageUpdated| {
///     println!("message {} edited", ev.id);
/// }));
///
/// dispatcher.dispatch(MessageUpdated { /* ... */ })?;
/// dispatcher.unsubscribe(&handle);
/// ```
pub struct EventDispatcher {
    id: u64,
    policy: FailurePolicy,
    next_slot: AtomicU64,
    registry: Mutex<HashMap<TypeId, Box<dyn HandlerList>>>,
}

impl EventDispatcher {
    /// Creates an empty dispatcher with the default isolating failure policy.
    pub fn new() -> Self {
        Self::with_policy(FailurePolicy::Isolate)
    }

    /// Creates an empty dispatcher with the given failure policy.
    pub fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            id: NEXT_DISPATCHER_ID.fetch_add(1, Ordering::Relaxed),
            policy,
            next_slot: AtomicU64::new(1),
            registry: Mutex::new(HashMap::new()),
        }
    }

    /// The failure policy this dispatcher was built with.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Registers a handler for event type `T`.
    ///
    /// The handler is appended to `T`'s list and will be invoked after every
    /// previously subscribed handler for `T`. Returns the handle used to
    /// remove the subscription later.
    pub fn subscribe<T: Event + Clone>(&self, handler: EventHandler<T>) -> ListenerHandle {
        let slot = self.next_slot.fetch_add(1, Ordering::Relaxed);
        let kind = handler.kind();

        let mut registry = self.registry.lock();
        let list = registry
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Slots::<T>::new()));
        list.as_any_mut()
            .downcast_mut::<Slots<T>>()
            .expect("handler list type matches its registry key")
            .push((slot, Arc::new(handler)));
        drop(registry);

        debug!(event = T::NAME, ?kind, slot, "Listener registered");

        ListenerHandle {
            dispatcher: self.id,
            event: TypeId::of::<T>(),
            slot,
            event_name: T::NAME,
        }
    }

    /// Removes the subscription identified by `handle`.
    ///
    /// Returns `true` if a handler was removed. Returns `false` (and changes
    /// nothing) if the handle was already removed or belongs to a different
    /// dispatcher instance. The order of remaining handlers is untouched.
    pub fn unsubscribe(&self, handle: &ListenerHandle) -> bool {
        if handle.dispatcher != self.id {
            debug!(event = handle.event_name, "Ignoring foreign listener handle");
            return false;
        }

        let removed = self
            .registry
            .lock()
            .get_mut(&handle.event)
            .is_some_and(|list| list.remove(handle.slot));

        if removed {
            debug!(event = handle.event_name, slot = handle.slot, "Listener removed");
        }
        removed
    }

    /// Synchronously delivers `payload` to every handler registered for `T`,
    /// in subscription order.
    ///
    /// The payload is adapted to each handler's declared reference form; a
    /// by-mut handler's changes are visible to the handlers after it in the
    /// same pass. See the module docs for mid-pass mutation and failure
    /// semantics.
    pub fn dispatch<T: Event + Clone>(&self, payload: T) -> DispatchResult<DispatchOutcome> {
        let span = span!(Level::DEBUG, "dispatch", event = T::NAME);
        let _enter = span.enter();

        // Snapshot under the lock, invoke outside it.
        let snapshot: Vec<Arc<EventHandler<T>>> = {
            let mut registry = self.registry.lock();
            match registry.get_mut(&TypeId::of::<T>()) {
                Some(list) => list
                    .as_any_mut()
                    .downcast_mut::<Slots<T>>()
                    .expect("handler list type matches its registry key")
                    .iter()
                    .map(|(_, handler)| Arc::clone(handler))
                    .collect(),
                None => Vec::new(),
            }
        };

        debug!(handlers = snapshot.len(), "Dispatching event");

        let mut payload = payload;
        let mut outcome = DispatchOutcome::default();
        for handler in &snapshot {
            match handler.invoke(&mut payload) {
                Ok(()) => outcome.delivered += 1,
                Err(source) => match self.policy {
                    FailurePolicy::Isolate => {
                        error!(event = T::NAME, error = %source, "Handler failed, continuing");
                        outcome.failed += 1;
                    }
                    FailurePolicy::Propagate => {
                        return Err(DispatchError::Handler {
                            event: T::NAME,
                            source,
                        });
                    }
                },
            }
        }

        Ok(outcome)
    }

    /// The number of handlers currently registered for event type `T`.
    pub fn handler_count<T: Event + Clone>(&self) -> usize {
        self.registry
            .lock()
            .get(&TypeId::of::<T>())
            .map_or(0, |list| list.len())
    }

    /// Whether no handlers are registered for any event type.
    pub fn is_empty(&self) -> bool {
        self.registry.lock().values().all(|list| list.len() == 0)
    }

    /// Removes every registered handler.
    pub fn clear(&self) {
        self.registry.lock().clear();
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.lock();
        let handlers: usize = registry.values().map(|list| list.len()).sum();
        f.debug_struct("EventDispatcher")
            .field("id", &self.id)
            .field("policy", &self.policy)
            .field("event_types", &registry.len())
            .field("handlers", &handlers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use std::sync::atomic::AtomicUsize;

    #[derive(Clone)]
    struct MessageUpdated {
        content: String,
    }

    #[derive(Clone)]
    struct GuildUpdated;

    crate::events! {
        MessageUpdated => ("MESSAGE_UPDATE", Message),
        GuildUpdated => ("GUILD_UPDATE", Guild),
    }

    /// Shared log of handler invocations, for asserting order.
    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    fn logging_handler(log: &CallLog, name: &'static str) -> EventHandler<MessageUpdated> {
        let log = Arc::clone(log);
        EventHandler::by_ref(move |_: &MessageUpdated| {
            log.lock().push(name);
        })
    }

    fn message(content: &str) -> MessageUpdated {
        MessageUpdated {
            content: content.to_string(),
        }
    }

    #[test]
    fn dispatch_without_handlers_is_empty_outcome() {
        let dispatcher = EventDispatcher::new();
        let outcome = dispatcher.dispatch(message("hi")).unwrap();
        assert_eq!(outcome, DispatchOutcome::default());
    }

    #[test]
    fn handlers_fire_in_subscription_order() {
        let dispatcher = EventDispatcher::new();
        let log: CallLog = Arc::default();

        dispatcher.subscribe(logging_handler(&log, "a"));
        dispatcher.subscribe(logging_handler(&log, "b"));
        dispatcher.subscribe(logging_handler(&log, "c"));

        let outcome = dispatcher.dispatch(message("hi")).unwrap();
        assert_eq!(outcome.delivered, 3);
        assert_eq!(*log.lock(), vec!["a", "b", "c"]);
    }

    #[test]
    fn dispatch_only_reaches_matching_event_type() {
        let dispatcher = EventDispatcher::new();
        let messages = Arc::new(AtomicUsize::new(0));
        let guilds = Arc::new(AtomicUsize::new(0));

        let m = Arc::clone(&messages);
        dispatcher.subscribe(EventHandler::by_ref(move |_: &MessageUpdated| {
            m.fetch_add(1, Ordering::SeqCst);
        }));
        let g = Arc::clone(&guilds);
        dispatcher.subscribe(EventHandler::by_ref(move |_: &GuildUpdated| {
            g.fetch_add(1, Ordering::SeqCst);
        }));

        dispatcher.dispatch(message("hi")).unwrap();

        assert_eq!(messages.load(Ordering::SeqCst), 1);
        assert_eq!(guilds.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribe_removes_exactly_one_handler() {
        let dispatcher = EventDispatcher::new();
        let log: CallLog = Arc::default();

        dispatcher.subscribe(logging_handler(&log, "a"));
        let b = dispatcher.subscribe(logging_handler(&log, "b"));
        dispatcher.subscribe(logging_handler(&log, "c"));

        dispatcher.dispatch(message("one")).unwrap();
        assert_eq!(*log.lock(), vec!["a", "b", "c"]);

        assert!(dispatcher.unsubscribe(&b));
        log.lock().clear();

        dispatcher.dispatch(message("two")).unwrap();
        assert_eq!(*log.lock(), vec!["a", "c"]);
        assert_eq!(dispatcher.handler_count::<MessageUpdated>(), 2);
    }

    #[test]
    fn double_unsubscribe_is_a_noop() {
        let dispatcher = EventDispatcher::new();
        let log: CallLog = Arc::default();

        let a = dispatcher.subscribe(logging_handler(&log, "a"));
        dispatcher.subscribe(logging_handler(&log, "b"));

        assert!(dispatcher.unsubscribe(&a));
        assert!(!dispatcher.unsubscribe(&a));

        dispatcher.dispatch(message("hi")).unwrap();
        assert_eq!(*log.lock(), vec!["b"]);
    }

    #[test]
    fn foreign_handle_is_rejected() {
        let first = EventDispatcher::new();
        let second = EventDispatcher::new();
        let log: CallLog = Arc::default();

        let handle = first.subscribe(logging_handler(&log, "a"));
        second.subscribe(logging_handler(&log, "b"));

        assert!(!second.unsubscribe(&handle));
        assert_eq!(second.handler_count::<MessageUpdated>(), 1);
        assert!(first.unsubscribe(&handle));
    }

    #[test]
    fn subscribe_during_dispatch_waits_for_next_pass() {
        let dispatcher = Arc::new(EventDispatcher::new());
        let late_calls = Arc::new(AtomicUsize::new(0));

        let d = Arc::clone(&dispatcher);
        let late = Arc::clone(&late_calls);
        dispatcher.subscribe(EventHandler::by_ref(move |_: &MessageUpdated| {
            let late = Arc::clone(&late);
            d.subscribe(EventHandler::by_ref(move |_: &MessageUpdated| {
                late.fetch_add(1, Ordering::SeqCst);
            }));
        }));

        // The handler subscribed mid-pass must not run in this pass.
        let outcome = dispatcher.dispatch(message("one")).unwrap();
        assert_eq!(outcome.delivered, 1);
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);

        // It runs on the next pass (which also subscribes another one).
        dispatcher.dispatch(message("two")).unwrap();
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_other_during_dispatch_keeps_pass_intact() {
        let dispatcher = Arc::new(EventDispatcher::new());
        let log: CallLog = Arc::default();
        let victim_handle: Arc<Mutex<Option<crate::ListenerHandle>>> = Arc::default();

        // "a" removes "b" mid-pass. "b" was already snapshotted, so it still
        // runs this pass; "c" must be neither skipped nor run twice.
        let d = Arc::clone(&dispatcher);
        let cell = Arc::clone(&victim_handle);
        let l = Arc::clone(&log);
        dispatcher.subscribe(EventHandler::by_ref(move |_: &MessageUpdated| {
            l.lock().push("a");
            if let Some(victim) = cell.lock().take() {
                assert!(d.unsubscribe(&victim));
            }
        }));
        let victim = dispatcher.subscribe(logging_handler(&log, "b"));
        dispatcher.subscribe(logging_handler(&log, "c"));
        *victim_handle.lock() = Some(victim);

        dispatcher.dispatch(message("one")).unwrap();
        assert_eq!(*log.lock(), vec!["a", "b", "c"]);

        log.lock().clear();
        dispatcher.dispatch(message("two")).unwrap();
        assert_eq!(*log.lock(), vec!["a", "c"]);
    }

    #[test]
    fn by_mut_changes_are_seen_by_later_handlers() {
        let dispatcher = EventDispatcher::new();
        let observed = Arc::new(Mutex::new(String::new()));

        dispatcher.subscribe(EventHandler::by_mut(|ev: &mut MessageUpdated| {
            ev.content.push_str(" (edited)");
        }));
        let o = Arc::clone(&observed);
        dispatcher.subscribe(EventHandler::by_value(move |ev: MessageUpdated| {
            *o.lock() = ev.content;
        }));

        dispatcher.dispatch(message("hello")).unwrap();
        assert_eq!(*observed.lock(), "hello (edited)");
    }

    #[test]
    fn isolate_policy_delivers_past_failures() {
        let dispatcher = EventDispatcher::new();
        let log: CallLog = Arc::default();

        dispatcher.subscribe(logging_handler(&log, "a"));
        dispatcher.subscribe(EventHandler::by_ref(|_: &MessageUpdated| {
            Err::<(), _>(crate::HandlerError::msg("boom"))
        }));
        dispatcher.subscribe(logging_handler(&log, "c"));

        let outcome = dispatcher.dispatch(message("hi")).unwrap();
        assert_eq!(outcome.delivered, 2);
        assert_eq!(outcome.failed, 1);
        assert!(!outcome.is_clean());
        assert_eq!(*log.lock(), vec!["a", "c"]);
    }

    #[test]
    fn propagate_policy_fails_fast() {
        let dispatcher = EventDispatcher::with_policy(FailurePolicy::Propagate);
        let log: CallLog = Arc::default();

        dispatcher.subscribe(logging_handler(&log, "a"));
        dispatcher.subscribe(EventHandler::by_ref(|_: &MessageUpdated| {
            Err::<(), _>(crate::HandlerError::msg("boom"))
        }));
        dispatcher.subscribe(logging_handler(&log, "c"));

        let err = dispatcher.dispatch(message("hi")).unwrap_err();
        let DispatchError::Handler { event, source } = err;
        assert_eq!(event, "MESSAGE_UPDATE");
        assert_eq!(source.to_string(), "boom");

        // The handler after the failing one never ran.
        assert_eq!(*log.lock(), vec!["a"]);
    }

    #[test]
    fn clear_empties_the_registry() {
        let dispatcher = EventDispatcher::new();
        let log: CallLog = Arc::default();

        dispatcher.subscribe(logging_handler(&log, "a"));
        dispatcher.subscribe(EventHandler::by_ref(|_: &GuildUpdated| {}));
        assert!(!dispatcher.is_empty());

        dispatcher.clear();
        assert!(dispatcher.is_empty());
        assert_eq!(dispatcher.handler_count::<MessageUpdated>(), 0);

        dispatcher.dispatch(message("hi")).unwrap();
        assert!(log.lock().is_empty());
    }
}
