//! Logging utilities for the Brio service.
//!
//! Every crate logs through the `tracing` macros; the binary calls [`init`]
//! (or [`init_with_level`]) once at startup.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
///
/// # Examples
///
/// ```
/// use brio_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level for the `brio*` targets.
///
/// `RUST_LOG` is honoured for everything else (e.g. `RUST_LOG=tower_http=debug`).
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    match format!("brio={}", level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(err) => eprintln!("invalid log directive for level {}: {}", level, err),
    }

    // try_init: a global subscriber may already be set (tests, embedding)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Parse a level name such as `"debug"`, falling back to INFO.
pub fn level_from_str(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::INFO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(level_from_str("debug"), Level::DEBUG);
        assert_eq!(level_from_str(" WARN "), Level::WARN);
        assert_eq!(level_from_str("chatty"), Level::INFO);
    }
}
