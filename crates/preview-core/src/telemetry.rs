//! Tracing initialisation for the action binary.
//!
//! Honors `RUST_LOG` when set, falling back to the supplied level.
//! Safe to call more than once; only the first call takes effect (the
//! global subscriber can only be set once per process).

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// * `json` — when `true`, emit newline-delimited JSON log lines.
/// * `level` — default verbosity when `RUST_LOG` is not set.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if json {
        builder.json().try_init().ok();
    } else {
        builder.try_init().ok();
    }
}
