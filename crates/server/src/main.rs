//! `fips-demo-svc`: server binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP spans).
//! 3. Load TLS material when HTTPS is configured.
//! 4. Build the Axum router.
//! 5. Run the HTTP and HTTPS listeners until SIGINT / SIGTERM.

mod config;
mod fips;
mod server;
mod telemetry;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;

use config::Config;
use server::{listener, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    let tls_paths = cfg.tls();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        http_enabled = cfg.http_enabled,
        http_port = cfg.http_port,
        tls_enabled = tls_paths.is_some(),
        tls_port = cfg.tls_port,
        "fips-demo-svc starting"
    );
    info!(fips_mode = fips::is_fips_enabled(), "host FIPS mode at startup");

    // -----------------------------------------------------------------------
    // 3. TLS
    // -----------------------------------------------------------------------
    let tls_config = tls_paths
        .as_ref()
        .map(server::tls::load_server_config)
        .transpose()?;

    // -----------------------------------------------------------------------
    // 4. Router
    // -----------------------------------------------------------------------
    let router = server::router::build(AppState::default(), cfg.request_timeout());

    // -----------------------------------------------------------------------
    // 5. Listeners
    // -----------------------------------------------------------------------
    let shutdown = CancellationToken::new();
    tokio::spawn(listener::shutdown_signal(shutdown.clone()));

    let http = async {
        if !cfg.http_enabled {
            return Ok(());
        }
        let tcp = listener::bind(cfg.http_port).await?;
        listener::serve_http(tcp, router.clone(), shutdown.clone()).await
    };
    let https = async {
        let Some(tls_config) = tls_config else {
            return Ok(());
        };
        let tcp = listener::bind(cfg.tls_port).await?;
        listener::serve_tls(tcp, router.clone(), tls_config, shutdown.clone()).await
    };

    let result = tokio::try_join!(http, https);
    shutdown.cancel();
    telemetry::shutdown_telemetry();

    result.map(|_| ())
}
