//! # Accord Core
//!
//! The event dispatch core of the Accord gateway client library.
//!
//! Application code subscribes typed callbacks to platform events, the
//! transport layer feeds decoded event payloads in, and the dispatcher fans
//! each payload out synchronously to every matching subscriber in
//! registration order.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌───────────┐
//! │  Transport  │────▶│ EventDispatcher │────▶│  Handler  │
//! │  (gateway)  │     │     (core)      │────▶│  Handler  │
//! └─────────────┘     └─────────────────┘────▶│  Handler  │
//!                                             └───────────┘
//! ```
//!
//! The building blocks:
//!
//! - [`Event`] - identity trait every payload type implements (string tag +
//!   classification; the registry itself is keyed by the concrete type).
//! - [`EventHandler`] - adapter erasing the four accepted callback shapes
//!   (by value, by `Arc`, by `&T`, by `&mut T`) behind one invocation entry
//!   point.
//! - [`ListenerHandle`] - opaque token returned at subscription, used to
//!   cancel it.
//! - [`EventDispatcher`] - the registry: subscribe, unsubscribe, dispatch.
//!
//! # Example
//!
//! ```rust,ignore
//! use accord_core::{EventDispatcher, EventHandler, Event, EventKind};
//!
//! #[derive(Clone)]
//! struct MessageUpdated {
//!     id: u64,
//!     content: String,
//! }
//!
//! accord_core::events! {
//!     MessageUpdated => ("MESSAGE_UPDATE", Message),
//! }
//!
//! let dispatcher = EventDispatcher::new();
//! let handle = dispatcher.subscribe(EventHandler::by_ref(|ev: &MessageUpdated| {
//!     println!("message {} is now: {}", ev.id, ev.content);
//! }));
//!
//! dispatcher.dispatch(MessageUpdated { id: 1, content: "hi".into() })?;
//! dispatcher.unsubscribe(&handle);
//! ```

mod dispatcher;
mod error;
mod event;
mod handle;
mod handler;

pub use dispatcher::{DispatchOutcome, EventDispatcher, FailurePolicy};
pub use error::{DispatchError, DispatchResult, HandlerError};
pub use event::{Event, EventKind};
pub use handle::ListenerHandle;
pub use handler::{CallbackKind, EventHandler, HandlerOutcome, IntoHandlerOutcome};
