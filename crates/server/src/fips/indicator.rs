//! Individual sources of evidence that the host runs in FIPS mode.

use std::{fs, path::PathBuf};

#[cfg(test)]
use mockall::automock;
use tracing::trace;

/// The only value any source may report to confirm FIPS mode.
const ENABLED: &str = "1";

/// One source consulted by [`super::FipsDetector`].
///
/// Implementations never fail: anything that prevents a source from being
/// read means that source does not confirm FIPS mode.
#[cfg_attr(test, automock)]
pub trait Indicator: Send + Sync {
    /// Label used in logs when this source confirms FIPS mode.
    fn name(&self) -> String;

    /// `true` if this source reports FIPS mode as enabled.
    fn confirms(&self) -> bool;
}

/// Environment variable set to exactly `"1"` when FIPS mode is requested.
#[derive(Debug, Clone)]
pub struct EnvIndicator {
    var: String,
}

impl EnvIndicator {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Indicator for EnvIndicator {
    fn name(&self) -> String {
        format!("env:{}", self.var)
    }

    fn confirms(&self) -> bool {
        // Compared verbatim; "1 " or "true" do not count.
        std::env::var_os(&self.var).is_some_and(|v| v == ENABLED)
    }
}

/// OS flag file whose whitespace-trimmed content is `"1"` in FIPS mode.
#[derive(Debug, Clone)]
pub struct FileIndicator {
    path: PathBuf,
}

impl FileIndicator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Indicator for FileIndicator {
    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn confirms(&self) -> bool {
        match fs::read_to_string(&self.path) {
            Ok(content) => content.trim() == ENABLED,
            Err(e) => {
                trace!(path = %self.path.display(), error = %e, "FIPS indicator file unreadable");
                false
            }
        }
    }
}
