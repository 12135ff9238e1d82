//! Tracing initialization.
//!
//! Uses `ObservabilityConfig` for SRA_QUIET, SRA_LOG_LEVEL and SRA_LOG_JSON;
//! `RUST_LOG` overrides everything.

use sra_core::config::ObservabilityConfig;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Clone, Copy)]
pub enum TracingMode {
    /// setup / check
    Default,
    /// start: the web server runs in debug mode with request tracing
    Server,
}

/// Call once at process startup, after `.env` has been loaded.
pub fn init_tracing(mode: TracingMode) {
    let cfg = ObservabilityConfig::from_env();
    let mut level: String = if cfg.quiet {
        "sra=warn".to_string()
    } else {
        cfg.log_level.clone()
    };

    if matches!(mode, TracingMode::Server) {
        level = format!("{level},sra_web=debug,tower_http=debug");
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
}
