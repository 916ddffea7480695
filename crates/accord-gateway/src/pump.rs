//! The receive pump: the hand-off point between transport and dispatch.
//!
//! A transport (websocket client, test harness, replay tool) pushes raw
//! frames into an mpsc channel; [`GatewayPump`] drains the channel and feeds
//! each frame to the [`GatewayRouter`]. Dispatch itself stays synchronous
//! inside the pump task, so all handlers for one frame finish before the next
//! frame is read.
//!
//! A frame that fails to route is logged and skipped; one bad frame must not
//! take down the receive loop.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::router::GatewayRouter;

/// Drains raw gateway frames from a channel into the router.
///
/// # Example
///
/// ```rust,ignore
/// use tokio::sync::mpsc;
/// use accord_gateway::{GatewayPump, GatewayRouter};
///
/// let (tx, rx) = mpsc::channel(64);
/// let pump = GatewayPump::new(router);
/// tokio::spawn(pump.run(rx));
///
/// // transport side:
/// tx.send(frame).await?;
/// ```
pub struct GatewayPump {
    router: GatewayRouter,
}

impl GatewayPump {
    /// Creates a pump feeding `router`.
    pub fn new(router: GatewayRouter) -> Self {
        Self { router }
    }

    /// Runs until the sending side of `frames` is dropped.
    ///
    /// Returns the router so a reconnecting transport can resume with the
    /// same bindings and sequence state.
    pub async fn run(self, mut frames: mpsc::Receiver<String>) -> GatewayRouter {
        info!("Gateway pump started");

        while let Some(frame) = frames.recv().await {
            match self.router.handle_frame(&frame) {
                Ok(Some(outcome)) if !outcome.is_clean() => {
                    debug!(failed = outcome.failed, "Frame delivered with handler failures");
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, "Dropping frame");
                }
            }
        }

        info!("Frame channel closed, gateway pump stopping");
        self.router
    }
}
