//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via `--log-level` and `RUST_LOG` (env wins)
//! - Written to stderr so stdout only ever carries the receipt

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor a level is given.
pub const DEFAULT_FILTER: &str = "tokensmith_runner=info,tokensmith=info";

/// Filter directive for a requested level.
pub fn filter_for(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match level {
        Some(level) => format!("tokensmith_runner={level},tokensmith={level}").into(),
        None => DEFAULT_FILTER.into(),
    })
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(level: Option<&str>) {
    let _ = tracing_subscriber::registry()
        .with(filter_for(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
