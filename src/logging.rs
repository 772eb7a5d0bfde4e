//! Tracing subscriber setup for the binary.

use std::io::IsTerminal;

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding a `tracing` filter directive.
pub const ENV_LOG: &str = "SUBVERTED_LOG";

/// Map the number of `-v` flags to a default level.
#[must_use]
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for command output. `SUBVERTED_LOG` overrides the verbosity flags.
pub fn setup_logger(verbose: u8) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose).into())
        .with_env_var(ENV_LOG)
        .from_env_lossy();

    let fmt = fmt::layer()
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::registry().with(fmt).with(env_filter).try_init();
}
