//! Error types for gateway frame handling.

use thiserror::Error;

use accord_core::DispatchError;

/// Errors that can occur while routing a gateway frame.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The frame was not a valid gateway envelope.
    #[error("malformed gateway envelope: {reason}")]
    Envelope {
        /// Reason for failure.
        reason: String,
    },

    /// The event payload did not decode into its typed form.
    #[error("failed to decode '{event}' payload: {source}")]
    Decode {
        /// The wire event name.
        event: &'static str,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A handler failed under the fail-fast dispatch policy.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
