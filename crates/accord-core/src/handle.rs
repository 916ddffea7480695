//! Listener handles for subscription removal.

use std::any::TypeId;

/// An opaque token identifying one registered subscription.
///
/// Returned by [`EventDispatcher::subscribe`](crate::EventDispatcher::subscribe)
/// and later passed to [`unsubscribe`](crate::EventDispatcher::unsubscribe).
/// The handle does not own the handler; it is a weak identity
/// (dispatcher instance, event type, slot) used purely for removal lookup.
/// Unsubscribing the same handle twice is a safe no-op, and a handle minted by
/// a different dispatcher instance is rejected.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    pub(crate) dispatcher: u64,
    pub(crate) event: TypeId,
    pub(crate) slot: u64,
    pub(crate) event_name: &'static str,
}

impl ListenerHandle {
    /// The string tag of the event type this handle subscribes to.
    pub fn event_name(&self) -> &'static str {
        self.event_name
    }
}

impl std::fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("event", &self.event_name)
            .field("slot", &self.slot)
            .finish()
    }
}
