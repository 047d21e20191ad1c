//! Logging utilities with Folio segment prefixes.
//!
//! Provides consistent logging setup across Folio binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with Folio defaults.
///
/// Sets up tracing-subscriber with:
/// - Environment filter (RUST_LOG)
/// - Compact format on stderr, keeping stdout free for command output
pub fn init() {
    init_with_filter("info");
}

/// Initialize tracing with a custom default filter.
///
/// `RUST_LOG` still wins when it is set.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Folio segment prefixes for logging.
pub mod prefix {
    /// Remote claims API
    pub const REMOTE: &str = "⇄";
    /// Local slot storage
    pub const LOCAL: &str = "⌂";
    /// Fallback from remote to local
    pub const FALLBACK: &str = "↺";
    /// Import and export of claim batches
    pub const BATCH: &str = "⇅";
}
