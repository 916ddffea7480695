//! Logging bootstrap built on `tracing-subscriber`.
//!
//! The library itself only emits `tracing` events; this module is a
//! convenience for applications that do not configure their own subscriber.
//!
//! ```rust,ignore
//! use accord::logging::LoggingBuilder;
//! use tracing::Level;
//!
//! LoggingBuilder::new()
//!     .with_level(Level::DEBUG)
//!     .directive("accord_core=trace")
//!     .init();
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line output.
    #[default]
    Compact,
    /// Multi-field output with full metadata.
    Full,
}

/// A builder for the process-wide tracing subscriber.
///
/// A `RUST_LOG` environment variable, when set, overrides the configured
/// base level; explicit directives are applied on top of either.
#[derive(Debug, Default)]
pub struct LoggingBuilder {
    level: Option<tracing::Level>,
    directives: Vec<String>,
    format: LogFormat,
    with_target: bool,
}

impl LoggingBuilder {
    /// Creates a builder with compact output at the default (info) level.
    pub fn new() -> Self {
        Self {
            with_target: true,
            ..Default::default()
        }
    }

    /// Sets the base log level.
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a filter directive, e.g. `"accord_gateway=debug"`.
    pub fn directive(mut self, directive: &str) -> Self {
        self.directives.push(directive.to_string());
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Include the target (module path) in log output.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    fn build_filter(&self) -> EnvFilter {
        let base_level = self.level.unwrap_or(tracing::Level::INFO);
        let base_filter = base_level.to_string().to_lowercase();

        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&base_filter));

        for directive in &self.directives {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }

        filter
    }

    /// Initializes the subscriber, ignoring failure if one is already set.
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Tries to initialize the subscriber.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.build_filter();

        match self.format {
            LogFormat::Compact => {
                let layer = fmt::layer().compact().with_target(self.with_target);
                tracing_subscriber::registry()
                    .with(layer)
                    .with(filter)
                    .try_init()
            }
            LogFormat::Full => {
                let layer = fmt::layer().with_target(self.with_target);
                tracing_subscriber::registry()
                    .with(layer)
                    .with(filter)
                    .try_init()
            }
        }
    }
}
