//! Telemetry initialization
//!
//! Structured logging setup for binaries embedding the engine. Libraries
//! never call this; the host application decides the subscriber.

use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Text,
    /// Structured JSON, one object per line
    Json,
}

/// Install the global tracing subscriber
///
/// The filter comes from `RUST_LOG` when set and defaults to `info`
/// otherwise. Calling this twice is a no-op; the second call's error is
/// discarded so tests can initialize freely.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    drop(result);
}
