//! Error types for the Accord dispatch core.

use thiserror::Error;

// =============================================================================
// Handler Errors
// =============================================================================

/// An error surfaced by a subscriber callback.
///
/// Callbacks may return any error type convertible into `HandlerError`; the
/// dispatcher either logs it and continues or aborts the pass, depending on
/// its [`FailurePolicy`](crate::FailurePolicy).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HandlerError {
    /// Creates a handler error from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an arbitrary error.
    pub fn new<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::msg(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::msg(message)
    }
}

// =============================================================================
// Dispatch Errors
// =============================================================================

/// Errors that can abort a dispatch pass.
///
/// Only produced under [`FailurePolicy::Propagate`](crate::FailurePolicy);
/// the default isolating policy reports failures through
/// [`DispatchOutcome`](crate::DispatchOutcome) instead.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A handler failed and the dispatcher is configured to fail fast.
    #[error("handler for '{event}' failed: {source}")]
    Handler {
        /// The event tag the failing handler was subscribed to.
        event: &'static str,
        /// The handler's error.
        #[source]
        source: HandlerError,
    },
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
