//! Logging initialization.
//!
//! One `init(profile)` call at process startup selects the output format;
//! everything after that goes through the op macros and plain `tracing`
//! calls. Diagnostics always go to stderr: stdout is reserved for command
//! output such as result envelopes.

use std::sync::Once;

use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output profile selected by the embedding binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, debug-level default filter
    Development,
    /// JSON lines, info-level default filter
    Production,
    /// No output; tests install the capture layer instead
    Test,
}

static INIT_ONCE: Once = Once::new();

/// `RUST_LOG` when set, otherwise the profile's default directive.
fn filter_or(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber for the given profile.
///
/// Idempotent: the first call wins and later calls are ignored, so library
/// consumers and tests may call it freely.
///
/// # Example
///
/// ```
/// use lockstep_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(filter_or("lockstep=debug"))
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter_or("lockstep=info"))
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Test => {
            // The capture layer is installed by init_test_capture(); this
            // branch only claims the Once so later init calls stay no-ops.
            tracing_subscriber::registry().init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_ignored() {
        init(Profile::Test);
        init(Profile::Development);
        init(Profile::Production);
    }

    #[test]
    fn test_profile_is_plain_data() {
        let p = Profile::Development;
        let copy = p;
        assert_eq!(p, copy);
        assert_ne!(Profile::Production, Profile::Test);
    }
}
