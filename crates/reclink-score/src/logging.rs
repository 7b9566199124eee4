//! Diagnostics for the scoring host.
//!
//! Everything here writes to stderr. Stdout carries exactly one result line
//! per input document.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Session compilation and per-batch summaries at `info`; per-field traces
/// stay off unless `RUST_LOG` asks for them.
pub const DEFAULT_FILTER: &str = "warn,reclink_core=info,reclink_score=info";

/// Install the stderr subscriber, honouring `RUST_LOG` over [`DEFAULT_FILTER`].
pub fn init() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter_or(DEFAULT_FILTER))
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
}

fn filter_or(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_default_filter_names_both_crates() {
        assert!(DEFAULT_FILTER.contains("reclink_core=info"));
        assert!(DEFAULT_FILTER.contains("reclink_score=info"));
    }
}
