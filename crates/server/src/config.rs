//! Configuration loading and validation for the service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any variable is invalid.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::server::middleware::DEFAULT_REQUEST_TIMEOUT;

/// Validated service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Serve plain HTTP on [`Config::http_port`].
    #[serde(default = "default_http_enabled")]
    pub http_enabled: bool,

    /// Port of the plain HTTP listener.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Port of the HTTPS listener. Only bound when TLS material is configured.
    #[serde(default = "default_tls_port")]
    pub tls_port: u16,

    /// Filesystem path to the PEM-encoded TLS certificate chain.
    #[serde(default)]
    pub tls_cert_path: Option<String>,

    /// Filesystem path to the PEM-encoded TLS private key.
    #[serde(default)]
    pub tls_key_path: Option<String>,

    /// PEM bundle of CAs trusted for client certificates. When set, clients
    /// are asked for a certificate but may still connect without one.
    #[serde(default)]
    pub tls_client_ca_path: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Tracing log level (e.g. `"info"`, `"debug"`). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// OTLP endpoint for span export. Export is disabled when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,
}

/// Paths to the PEM files backing the HTTPS listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: String,
    pub key: String,
    pub client_ca: Option<String>,
}

fn default_http_enabled() -> bool {
    true
}
fn default_http_port() -> u16 {
    8080
}
fn default_tls_port() -> u16 {
    8443
}
fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or the combination
    /// is invalid.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// TLS file paths, or `None` when HTTPS is not configured.
    pub fn tls(&self) -> Option<TlsPaths> {
        match (&self.tls_cert_path, &self.tls_key_path) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.clone(),
                key: key.clone(),
                client_ca: self.tls_client_ca_path.clone(),
            }),
            _ => None,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty_opt(&self.tls_cert_path, "TLS_CERT_PATH")?;
        ensure_non_empty_opt(&self.tls_key_path, "TLS_KEY_PATH")?;
        ensure_non_empty_opt(&self.tls_client_ca_path, "TLS_CLIENT_CA_PATH")?;
        ensure_non_empty_opt(&self.otel_exporter_otlp_endpoint, "OTEL_EXPORTER_OTLP_ENDPOINT")?;

        match (&self.tls_cert_path, &self.tls_key_path) {
            (Some(_), None) => anyhow::bail!("TLS_CERT_PATH is set but TLS_KEY_PATH is missing"),
            (None, Some(_)) => anyhow::bail!("TLS_KEY_PATH is set but TLS_CERT_PATH is missing"),
            (None, None) if self.tls_client_ca_path.is_some() => {
                anyhow::bail!("TLS_CLIENT_CA_PATH requires TLS_CERT_PATH and TLS_KEY_PATH")
            }
            _ => {}
        }

        if !self.http_enabled && self.tls().is_none() {
            anyhow::bail!("no listener enabled: set HTTP_ENABLED=true or configure TLS");
        }
        if self.http_port == 0 {
            anyhow::bail!("HTTP_PORT must be > 0");
        }
        if self.tls_port == 0 {
            anyhow::bail!("TLS_PORT must be > 0");
        }
        if self.http_enabled && self.tls().is_some() && self.http_port == self.tls_port {
            anyhow::bail!("HTTP_PORT and TLS_PORT must differ");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be > 0");
        }
        Ok(())
    }
}

fn ensure_non_empty_opt(value: &Option<String>, name: &str) -> Result<()> {
    if let Some(v) = value {
        if v.trim().is_empty() {
            anyhow::bail!("{name} must not be empty when set");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            http_enabled: default_http_enabled(),
            http_port: default_http_port(),
            tls_port: default_tls_port(),
            tls_cert_path: None,
            tls_key_path: None,
            tls_client_ca_path: None,
            request_timeout_secs: default_request_timeout(),
            log_level: default_log_level(),
            otel_exporter_otlp_endpoint: None,
        }
    }

    fn with_tls() -> Config {
        Config {
            tls_cert_path: Some("/etc/tls/server.pem".into()),
            tls_key_path: Some("/etc/tls/server-key.pem".into()),
            ..base()
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert!(default_http_enabled());
        assert_eq!(default_http_port(), 8080);
        assert_eq!(default_tls_port(), 8443);
        assert_eq!(default_request_timeout(), 30);
        assert_eq!(
            Duration::from_secs(default_request_timeout()),
            DEFAULT_REQUEST_TIMEOUT
        );
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_plain_http_only() {
        let cfg = base();
        assert!(cfg.validate().is_ok());
        assert!(cfg.tls().is_none());
    }

    #[test]
    fn validate_accepts_tls_with_client_ca() {
        let cfg = Config {
            tls_client_ca_path: Some("/etc/tls/root-ca.pem".into()),
            ..with_tls()
        };
        assert!(cfg.validate().is_ok());
        let tls = cfg.tls().unwrap();
        assert_eq!(tls.cert, "/etc/tls/server.pem");
        assert_eq!(tls.key, "/etc/tls/server-key.pem");
        assert_eq!(tls.client_ca.as_deref(), Some("/etc/tls/root-ca.pem"));
    }

    #[test]
    fn validate_rejects_cert_without_key() {
        let cfg = Config {
            tls_key_path: None,
            ..with_tls()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_key_without_cert() {
        let cfg = Config {
            tls_cert_path: None,
            ..with_tls()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_client_ca_without_tls() {
        let cfg = Config {
            tls_client_ca_path: Some("/etc/tls/root-ca.pem".into()),
            ..base()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_path() {
        let cfg = Config {
            tls_cert_path: Some("  ".into()),
            ..with_tls()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_no_listener() {
        let cfg = Config {
            http_enabled: false,
            ..base()
        };
        assert!(cfg.validate().is_err());

        let cfg = Config {
            http_enabled: false,
            ..with_tls()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_shared_port() {
        let cfg = Config {
            tls_port: 8080,
            ..with_tls()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let cfg = Config {
            request_timeout_secs: 0,
            ..base()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_otlp_endpoint() {
        let cfg = Config {
            otel_exporter_otlp_endpoint: Some(String::new()),
            ..base()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn request_timeout_in_seconds() {
        assert_eq!(base().request_timeout(), Duration::from_secs(30));
    }
}
