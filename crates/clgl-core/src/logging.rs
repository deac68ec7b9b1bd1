//! Log output for the interop backend.
//!
//! Everything in this workspace logs through `tracing`. Embedders that
//! already install a subscriber need nothing from here; standalone tools and
//! tests can call [`init`] or [`init_for_tests`].

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "CLGL_LOG";

const DEFAULT_DIRECTIVES: &str = "warn";

static INIT: OnceCell<()> = OnceCell::new();

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install a fmt subscriber filtered by `CLGL_LOG` (default `warn`).
///
/// Safe to call more than once. If another global subscriber is already set
/// it is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_target(true)
            .try_init();
        if installed.is_err() {
            tracing::trace!("global subscriber already installed");
        }
    });
}

/// Like [`init`], but writes through the test harness so output is captured
/// per test.
pub fn init_for_tests() {
    INIT.get_or_init(|| {
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_test_writer()
            .try_init();
        if installed.is_err() {
            tracing::trace!("global subscriber already installed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_for_tests();
        init();
        init_for_tests();
        assert!(INIT.get().is_some());
    }
}
