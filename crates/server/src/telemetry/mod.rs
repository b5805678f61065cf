//! Structured logging and optional OpenTelemetry span export.
//!
//! Logs are JSON lines on stdout. Log level is configurable via `LOG_LEVEL`
//! (default: `info`) or `RUST_LOG`. Spans are exported over OTLP/gRPC only when
//! `OTEL_EXPORTER_OTLP_ENDPOINT` is set.

pub mod init;

pub use init::{init_telemetry, shutdown_telemetry};
