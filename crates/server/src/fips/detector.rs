//! Ordered evaluation of FIPS indicators.

use std::{path::PathBuf, sync::Arc};

use tracing::debug;

use super::indicator::{EnvIndicator, FileIndicator, Indicator};
use super::{FIPS_ENV_VAR, FIPS_INDICATOR_FILES};

/// Decides whether the host runs in FIPS mode by consulting an ordered list
/// of [`Indicator`]s. The first confirming source wins and the remaining
/// sources are not consulted.
///
/// Cloning is cheap: the indicator list is shared and never mutated.
#[derive(Clone)]
pub struct FipsDetector {
    indicators: Arc<[Box<dyn Indicator>]>,
}

impl FipsDetector {
    /// Build a detector from an explicit, ordered list of sources.
    pub fn new(indicators: Vec<Box<dyn Indicator>>) -> Self {
        Self {
            indicators: indicators.into(),
        }
    }

    /// An environment variable followed by a list of flag files, in order.
    pub fn from_sources<I, P>(env_var: &str, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut indicators: Vec<Box<dyn Indicator>> = vec![Box::new(EnvIndicator::new(env_var))];
        indicators.extend(
            files
                .into_iter()
                .map(|p| Box::new(FileIndicator::new(p)) as Box<dyn Indicator>),
        );
        Self::new(indicators)
    }

    /// The standard Linux sources: `OPENSSL_FIPS`, then the kernel crypto
    /// flag, then the system FIPS marker file.
    pub fn system() -> Self {
        Self::from_sources(FIPS_ENV_VAR, FIPS_INDICATOR_FILES)
    }

    /// Name of the first source confirming FIPS mode, or `None`.
    pub fn detect(&self) -> Option<String> {
        let hit = self
            .indicators
            .iter()
            .find(|i| i.confirms())
            .map(|i| i.name());

        match &hit {
            Some(source) => debug!(%source, "FIPS mode confirmed"),
            None => debug!(sources = self.indicators.len(), "no source confirms FIPS mode"),
        }
        hit
    }

    /// `true` if any source confirms FIPS mode.
    pub fn is_enabled(&self) -> bool {
        self.detect().is_some()
    }
}

impl Default for FipsDetector {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fips::indicator::MockIndicator;
    use std::path::Path;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn confirming(name: &'static str) -> MockIndicator {
        let mut m = MockIndicator::new();
        m.expect_confirms().times(1).return_const(true);
        m.expect_name().return_const(name.to_string());
        m
    }

    fn declining() -> MockIndicator {
        let mut m = MockIndicator::new();
        m.expect_confirms().times(1).return_const(false);
        m
    }

    fn untouched() -> MockIndicator {
        let mut m = MockIndicator::new();
        m.expect_confirms().never();
        m
    }

    #[test]
    fn first_confirming_source_short_circuits() {
        let detector = FipsDetector::new(vec![
            Box::new(declining()),
            Box::new(confirming("second")),
            Box::new(untouched()),
        ]);
        assert_eq!(detector.detect().as_deref(), Some("second"));
    }

    #[test]
    fn no_confirming_source_is_disabled() {
        let detector = FipsDetector::new(vec![Box::new(declining()), Box::new(declining())]);
        assert!(!detector.is_enabled());
    }

    #[test]
    fn empty_detector_is_disabled() {
        assert!(!FipsDetector::new(Vec::new()).is_enabled());
    }

    #[test]
    fn env_one_wins_regardless_of_files() {
        std::env::set_var("FIPS_DETECTOR_TEST_ENV_WINS", "1");
        let dir = tempfile::tempdir().unwrap();
        let kernel = write(dir.path(), "fips_enabled", "0\n");
        let detector = FipsDetector::from_sources(
            "FIPS_DETECTOR_TEST_ENV_WINS",
            [kernel, dir.path().join("absent")],
        );
        assert_eq!(
            detector.detect().as_deref(),
            Some("env:FIPS_DETECTOR_TEST_ENV_WINS")
        );
    }

    #[test]
    fn kernel_flag_confirms_when_env_is_not_one() {
        std::env::set_var("FIPS_DETECTOR_TEST_ENV_ZERO", "0");
        let dir = tempfile::tempdir().unwrap();
        for content in ["1", "1\n"] {
            let kernel = write(dir.path(), "fips_enabled", content);
            let detector = FipsDetector::from_sources(
                "FIPS_DETECTOR_TEST_ENV_ZERO",
                [kernel, dir.path().join("system-fips")],
            );
            assert!(detector.is_enabled(), "{content:?}");
        }
    }

    #[test]
    fn marker_file_alone_confirms() {
        let dir = tempfile::tempdir().unwrap();
        let marker = write(dir.path(), "system-fips", "1\n");
        let detector = FipsDetector::from_sources(
            "FIPS_DETECTOR_TEST_UNSET_A",
            [dir.path().join("fips_enabled"), marker.clone()],
        );
        assert_eq!(
            detector.detect(),
            Some(format!("file:{}", marker.display()))
        );
    }

    #[test]
    fn both_files_confirm_reports_first() {
        let dir = tempfile::tempdir().unwrap();
        let kernel = write(dir.path(), "fips_enabled", "1\n");
        let marker = write(dir.path(), "system-fips", "1");
        let detector =
            FipsDetector::from_sources("FIPS_DETECTOR_TEST_UNSET_B", [kernel.clone(), marker]);
        assert_eq!(
            detector.detect(),
            Some(format!("file:{}", kernel.display()))
        );
    }

    #[test]
    fn nothing_confirms_when_files_absent_or_not_one() {
        let dir = tempfile::tempdir().unwrap();
        let detector = FipsDetector::from_sources(
            "FIPS_DETECTOR_TEST_UNSET_C",
            [dir.path().join("fips_enabled"), dir.path().join("system-fips")],
        );
        assert!(!detector.is_enabled());

        let kernel = write(dir.path(), "fips_enabled", "0");
        let marker = write(dir.path(), "system-fips", "");
        let detector = FipsDetector::from_sources("FIPS_DETECTOR_TEST_UNSET_C", [kernel, marker]);
        assert!(!detector.is_enabled());
    }

    #[test]
    fn system_detector_checks_standard_sources_in_order() {
        let names: Vec<String> = FipsDetector::system()
            .indicators
            .iter()
            .map(|i| i.name())
            .collect();
        assert_eq!(
            names,
            [
                "env:OPENSSL_FIPS",
                "file:/proc/sys/crypto/fips_enabled",
                "file:/etc/system-fips",
            ]
        );
    }

    #[test]
    fn clones_share_indicators() {
        let a = FipsDetector::system();
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.indicators, &b.indicators));
    }
}
