//! Development-time tracing for debugging verification runs.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: Dev diagnostics via `RUST_LOG`, output to stderr.
//!   The verifier emits `debug` events per stage and `trace` events per field.
//!   Never consulted to decide a run's outcome.
//!
//! - **Verification result ([`VerifyError`](crate::VerifyError))**: The outcome
//!   of a run, returned to the caller regardless of `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize a tracing subscriber for development logging.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
/// Output: stderr, compact format. Calling it again after a subscriber is
/// installed is a no-op, so every test may call it.
///
/// # Example
/// ```bash
/// RUST_LOG=clonecheck=trace cargo test -- --nocapture
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
