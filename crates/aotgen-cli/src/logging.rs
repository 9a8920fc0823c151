//! Stderr logging for the pipeline's `tracing` events.

use tracing_subscriber::EnvFilter;

/// Variable that overrides `-v` with a full filter directive.
pub const LOG_ENV: &str = "AOTGEN_LOG";

/// Filter directive for a `-v` count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "aotgen_compiler=debug",
        _ => "aotgen_compiler=trace",
    }
}

pub fn init(verbose: u8) {
    let filter = match std::env::var(LOG_ENV) {
        Ok(_) => EnvFilter::try_from_env(LOG_ENV).unwrap_or_default(),
        Err(_) => EnvFilter::new(default_directive(verbose)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .without_time()
        .init();
}
