//! Tracing subscriber setup. Logs always go to stderr so that stdout carries
//! only command results.

use tracing_subscriber::EnvFilter;

/// Picks the filter directive: `RUST_LOG` wins, then `-v` count, then the
/// configured level. `-q` caps the fallback at `error`.
fn filter_directive(verbose: u8, quiet: bool, configured: &str) -> String {
    if let Ok(env) = std::env::var(EnvFilter::DEFAULT_ENV) {
        if !env.trim().is_empty() {
            return env;
        }
    }
    match (quiet, verbose) {
        (true, _) => "error".to_string(),
        (false, 0) => configured.to_string(),
        (false, 1) => "info".to_string(),
        (false, 2) => "debug".to_string(),
        (false, _) => "trace".to_string(),
    }
}

/// Installs the global fmt subscriber. An invalid directive falls back to
/// `warn`; a second call is a no-op.
pub fn init(verbose: u8, quiet: bool, configured: &str, use_color: bool) {
    let directive = filter_directive(verbose, quiet, configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .with_target(false)
        .try_init();
}
