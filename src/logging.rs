//! Tracing subscribers for the binaries and the integration tests.
//!
//! Without `RUST_LOG`, only this crate (and the calling binary) log below
//! `warn`; dependencies stay at `warn`.

use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Target prefix of every event emitted by this library
pub const LOG_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Install a global subscriber logging to `stdout`.
///
/// `bin_target` is the calling binary's crate name, so its own events pass
/// the default filter next to the library's.
pub fn init_subscriber(bin_target: &str) {
    let fmt_layer = fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_or_scoped(LevelFilter::INFO, &[LOG_TARGET, bin_target]))
        .with(fmt_layer)
        .init();
}

/// Subscriber for tests, installed only for the lifetime of the returned guard.
pub fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    let fmt_layer = fmt::layer().with_target(true).with_test_writer();

    tracing_subscriber::registry()
        .with(env_or_scoped(LevelFilter::DEBUG, &[LOG_TARGET]))
        .with(fmt_layer)
        .set_default()
}

fn env_or_scoped(level: LevelFilter, targets: &[&str]) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| scoped_filter(level, targets))
}

/// `level` for each of `targets`, `warn` for everything else
fn scoped_filter(level: LevelFilter, targets: &[&str]) -> EnvFilter {
    let directives = targets
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",");

    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}
