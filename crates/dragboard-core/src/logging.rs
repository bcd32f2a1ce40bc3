#![forbid(unsafe_code)]

//! Optional structured logging facade.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported here
//! (and at the crate root) so dependents log through one path. The
//! `tracing-json` feature adds [`init_json_logging`] for hosts that want
//! newline-delimited JSON output filtered by `RUST_LOG`.

#[cfg(feature = "tracing")]
pub use tracing::{
    Level, debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn,
    warn_span,
};

/// Install a global JSON subscriber honoring `RUST_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_refused() {
        let _ = init_json_logging();
        assert!(!init_json_logging());
        info!(target: "dragboard", "json logging installed");
    }
}
