//! Callable adapter for subscriber callbacks.
//!
//! User callbacks come in four shapes, depending on how they want to receive
//! the event payload:
//!
//! - **by value** - `Fn(T)`; the payload is cloned for each invocation.
//! - **by shared handle** - `Fn(Arc<T>)`; the payload is cloned into a fresh
//!   `Arc` the callback may retain past the dispatch pass.
//! - **by reference** - `Fn(&T)`; no copy.
//! - **by mutable reference** - `Fn(&mut T)`; mutations are visible to
//!   handlers invoked later in the same dispatch pass.
//!
//! [`EventHandler`] erases the shape behind a single [`invoke`] entry point so
//! the dispatcher can keep heterogeneous handlers in one ordered list per
//! event type. The shape is fixed at construction and invocation always
//! routes through it, so a by-reference callback can never be handed an
//! accidental copy, nor a by-value callback a shared borrow.
//!
//! [`invoke`]: EventHandler::invoke

use std::sync::Arc;

use crate::error::HandlerError;
use crate::event::Event;

/// Outcome of a single handler invocation.
pub type HandlerOutcome = Result<(), HandlerError>;

// =============================================================================
// Return-value normalization
// =============================================================================

/// A trait for types that subscriber callbacks can return.
///
/// Lets the same constructors accept both infallible callbacks (returning
/// `()`) and fallible ones (returning `Result<(), E>` for any error
/// convertible into [`HandlerError`]).
pub trait IntoHandlerOutcome {
    /// Converts the callback's return value into a [`HandlerOutcome`].
    fn into_outcome(self) -> HandlerOutcome;
}

impl IntoHandlerOutcome for () {
    fn into_outcome(self) -> HandlerOutcome {
        Ok(())
    }
}

impl<E: Into<HandlerError>> IntoHandlerOutcome for Result<(), E> {
    fn into_outcome(self) -> HandlerOutcome {
        self.map_err(Into::into)
    }
}

// =============================================================================
// Callback shapes
// =============================================================================

/// The reference form a callback was registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    /// Receives an owned clone of the payload.
    Value,
    /// Receives the payload behind a fresh `Arc`.
    Shared,
    /// Receives a shared borrow of the payload.
    Ref,
    /// Receives a mutable borrow of the payload.
    RefMut,
}

enum Callback<T> {
    Value(Box<dyn Fn(T) -> HandlerOutcome + Send + Sync>),
    Shared(Box<dyn Fn(Arc<T>) -> HandlerOutcome + Send + Sync>),
    Ref(Box<dyn Fn(&T) -> HandlerOutcome + Send + Sync>),
    RefMut(Box<dyn Fn(&mut T) -> HandlerOutcome + Send + Sync>),
}

// =============================================================================
// EventHandler
// =============================================================================

/// A registered subscriber callback for event type `T`.
///
/// Constructed through one of the four shape constructors and stored by the
/// dispatcher; the shape tag is immutable for the handler's lifetime.
///
/// # Example
///
/// ```rust,ignore
/// use accord_core::EventHandler;
///
/// let by_ref = EventHandler::by_ref(|ev: &MessageUpdated| {
///     println!("edited: {}", ev.content);
/// });
///
/// let by_value = EventHandler::by_value(|ev: MessageUpdated| {
///     archive.push(ev); // owns its copy
/// });
/// ```
pub struct EventHandler<T: Event> {
    callback: Callback<T>,
}

impl<T: Event + Clone> EventHandler<T> {
    /// Registers a callback that takes the payload by value.
    ///
    /// The payload is cloned once per invocation.
    pub fn by_value<F, R>(callback: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
        R: IntoHandlerOutcome,
    {
        Self {
            callback: Callback::Value(Box::new(move |payload| callback(payload).into_outcome())),
        }
    }

    /// Registers a callback that takes the payload behind an `Arc`.
    ///
    /// Each invocation clones the payload into a fresh `Arc`, which the
    /// callback may keep alive past the dispatch pass.
    pub fn by_shared<F, R>(callback: F) -> Self
    where
        F: Fn(Arc<T>) -> R + Send + Sync + 'static,
        R: IntoHandlerOutcome,
    {
        Self {
            callback: Callback::Shared(Box::new(move |payload| callback(payload).into_outcome())),
        }
    }

    /// Registers a callback that borrows the payload.
    pub fn by_ref<F, R>(callback: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: IntoHandlerOutcome,
    {
        Self {
            callback: Callback::Ref(Box::new(move |payload| callback(payload).into_outcome())),
        }
    }

    /// Registers a callback that mutably borrows the payload.
    ///
    /// Mutations are visible to handlers invoked later in the same dispatch
    /// pass; by-value and by-shared handlers always see the payload state at
    /// their own position in the pass.
    pub fn by_mut<F, R>(callback: F) -> Self
    where
        F: Fn(&mut T) -> R + Send + Sync + 'static,
        R: IntoHandlerOutcome,
    {
        Self {
            callback: Callback::RefMut(Box::new(move |payload| callback(payload).into_outcome())),
        }
    }

    /// The reference form this handler was registered with.
    pub fn kind(&self) -> CallbackKind {
        match self.callback {
            Callback::Value(_) => CallbackKind::Value,
            Callback::Shared(_) => CallbackKind::Shared,
            Callback::Ref(_) => CallbackKind::Ref,
            Callback::RefMut(_) => CallbackKind::RefMut,
        }
    }

    /// Invokes the callback, adapting `payload` to the registered shape.
    ///
    /// The dispatcher only reaches this for payloads of the matching concrete
    /// type, so no runtime type check happens here.
    pub fn invoke(&self, payload: &mut T) -> HandlerOutcome {
        match &self.callback {
            Callback::Value(f) => f(payload.clone()),
            Callback::Shared(f) => f(Arc::new(payload.clone())),
            Callback::Ref(f) => f(payload),
            Callback::RefMut(f) => f(payload),
        }
    }
}

impl<T: Event + Clone> std::fmt::Debug for EventHandler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandler")
            .field("event", &T::NAME)
            .field("kind", &self.kind())
            .finish()
    }
}
