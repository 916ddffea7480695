//! # Accord Gateway
//!
//! The transport-facing half of the Accord client library: typed payload
//! structs for the platform's gateway events, a router that turns raw JSON
//! frames into typed dispatches, and an async pump connecting a transport's
//! frame channel to the router.
//!
//! ```text
//! transport ──frames──▶ GatewayPump ──▶ GatewayRouter ──▶ EventDispatcher
//! ```
//!
//! The actual network connection (websocket, compression, heartbeating) is
//! not provided here; any transport that can hand over complete frames as
//! strings can drive the pump.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use accord_core::{EventDispatcher, EventHandler};
//! use accord_gateway::{GatewayRouter, MessageUpdated};
//!
//! let dispatcher = Arc::new(EventDispatcher::new());
//! dispatcher.subscribe(EventHandler::by_ref(|ev: &MessageUpdated| {
//!     if ev.edited() {
//!         println!("message {} was edited", ev.id);
//!     }
//! }));
//!
//! let router = GatewayRouter::new(dispatcher);
//! router.handle_frame(frame)?;
//! ```

mod error;
mod model;
mod pump;
mod router;

pub use error::{GatewayError, GatewayResult};
pub use model::*;
pub use pump::GatewayPump;
pub use router::GatewayRouter;
