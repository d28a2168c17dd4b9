// src/log.rs
//! Logging setup plus the short macros the crate logs through.
//! Output goes to stderr so stdout stays clean for exports.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Install the global subscriber. A non-empty `RUST_LOG` decides the
/// filter; otherwise `verbosity` (the `-v` count) does.
pub fn init(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = filter_for(verbosity, std::env::var("RUST_LOG").ok().as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false);

    // a second init (tests, embedding hosts) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbosity: u8, rust_log: Option<&str>) -> EnvFilter {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    match rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|e| {
            eprintln!("ignoring invalid RUST_LOG {directives:?}: {e}");
            EnvFilter::default().add_directive(level.into())
        }),
        None => EnvFilter::default().add_directive(level.into()),
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_sets_level_without_rust_log() {
        assert_eq!(filter_for(0, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(filter_for(2, Some("  ")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(filter_for(9, None).max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn bare_rust_log_level_is_not_overridden() {
        assert_eq!(filter_for(0, Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(filter_for(3, Some("error")).max_level_hint(), Some(LevelFilter::ERROR));
    }
}
