// src/logging.rs
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `SCANDIR_LOG=debug`.
pub const LOG_ENV: &str = "SCANDIR_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Logs go to stderr so they never interleave with results on stdout.
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let on_terminal = std::io::stderr().is_terminal();
    colored::control::set_override(on_terminal);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(on_terminal)
        .without_time()
        .try_init();
}
