#![forbid(unsafe_code)]

//! Logging glue.
//!
//! With the `tracing` feature the sheet emits structured events under the
//! `sheet.*` message names (`sheet.mount`, `sheet.transition`,
//! `sheet.snap_back`, `sheet.settle`, `sheet.reconfigure`, `sheet.listener`)
//! and a `sheet.gesture` span around gesture handling. Without it, every
//! call site compiles away.
//!
//! `tracing-json` adds [`init_json_subscriber`] for hosts that want
//! line-delimited JSON logs filtered by `RUST_LOG`.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Install a global JSON subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
