//! Telemetry helpers for applications embedding `glyph-charts`.
//!
//! The library only emits `tracing` events; it never installs a subscriber
//! on its own. Hosts either call one of the initializers below (behind the
//! `telemetry` feature) or wire their own subscriber and filters.

/// Default directive applied when the environment sets no filter.
pub const DEFAULT_FILTER: &str = "glyph_charts=info";

/// Initializes a compact `tracing` subscriber with the given fallback
/// filter directive. The `RUST_LOG` environment variable, when set, takes
/// precedence over `default_filter`.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or
/// if a global subscriber was already set by the host application.
#[must_use]
pub fn init_tracing(default_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_filter;
        false
    }
}

/// Initializes the subscriber with [`DEFAULT_FILTER`] as the fallback.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(DEFAULT_FILTER)
}
