//! FIPS-mode detection.
//!
//! The host is considered to run in FIPS mode when any of these sources
//! confirms it, checked in order:
//!
//! 1. `OPENSSL_FIPS` is set to exactly `"1"`.
//! 2. `/proc/sys/crypto/fips_enabled` contains `"1"` (surrounding whitespace ignored).
//! 3. `/etc/system-fips` contains `"1"` (surrounding whitespace ignored).
//!
//! Detection never fails. A missing variable or an absent, unreadable, or
//! non-matching file only means that source does not confirm FIPS mode.
//! Nothing is cached; every call re-reads its sources.

pub mod detector;
pub mod indicator;

pub use detector::FipsDetector;

/// Environment variable conventionally used to request FIPS mode.
pub const FIPS_ENV_VAR: &str = "OPENSSL_FIPS";

/// OS flag files consulted after [`FIPS_ENV_VAR`], in order.
pub const FIPS_INDICATOR_FILES: [&str; 2] = ["/proc/sys/crypto/fips_enabled", "/etc/system-fips"];

/// Whether the host enforces FIPS-approved cryptography, using the standard
/// sources.
pub fn is_fips_enabled() -> bool {
    FipsDetector::system().is_enabled()
}
