//! Logging setup using `tracing-subscriber`.
//!
//! Logs go to stderr so exported data on stdout stays clean. `RUST_LOG`
//! takes precedence; otherwise the level comes from the `-v` count.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a level: none is warn, `-v` debug, `-vv` trace.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.to_string().to_lowercase();
        EnvFilter::new(format!("cleanform={level},cleanform_cli={level}"))
    })
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(verbosity: u8) {
    let filter = build_env_filter(level_for_verbosity(verbosity));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    if let Err(error) = result {
        eprintln!("warning: failed to initialize logging: {}", error);
    }
}
