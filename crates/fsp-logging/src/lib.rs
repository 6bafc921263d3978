//! Structured logging setup shared by the retrieval orchestrator, the FSP
//! client, and the CLI.
//!
//! Every crate in this workspace logs through `tracing`; this crate only
//! owns the one-time global subscriber setup, so the choice of format and
//! filtering lives in a single place instead of being duplicated per binary.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable consulted for the log filter, same convention as
/// `RUST_LOG`.
pub const LOG_FILTER_ENV: &str = "FSP_LOG";

/// Installs a global `tracing` subscriber that writes human-readable,
/// timestamped lines to stderr.
///
/// The filter is read from [`LOG_FILTER_ENV`] (falling back to `info` for
/// this crate's callers and `warn` for everything else) so a retrieval run
/// can be made verbose without recompiling. Calling this more than once is
/// harmless: subsequent calls are no-ops, matching `tracing`'s own
/// set-global-default semantics.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn,fsp_transport=info,fsp_archive=info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_does_not_panic_when_called_repeatedly() {
        init();
        init();
    }
}
