//! Web entry point: `/` status page and `/health`.
//!
//! The launcher builds an [`sra_core::config::AppConfig`] once and hands it to
//! [`serve`]; handlers read it through [`state::AppState`].

pub mod handlers;
pub mod page;
pub mod router;
pub mod state;

use std::future::Future;

use anyhow::{Context, Result};
use sra_core::config::AppConfig;

use crate::router::build_router;
use crate::state::AppState;

/// Bind `config.bind_addr()` and serve until `shutdown` resolves.
pub async fn serve<F>(config: AppConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_addr();
    let debug_mode = config.debug;
    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, debug = debug_mode, "web server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("web server terminated with an error")?;

    tracing::info!("web server stopped");
    Ok(())
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[tokio::test]
    async fn test_serve_reports_bind_failure() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let tmp = tempfile::tempdir().unwrap();
        let mut config = AppConfig::resolve_from(&tmp.path().join("config.env"), None);
        config.host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.port = port;

        let err = serve(config, async {}).await.unwrap_err();
        assert!(err.to_string().contains("failed to bind"));
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = AppConfig::resolve_from(&tmp.path().join("config.env"), None);
        config.host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.port = 0;
        config.debug = true;

        serve(config, async {}).await.unwrap();
    }
}
