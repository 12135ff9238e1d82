//! `sra start` — preflight, then hand off to the web server.

use std::future::Future;

use sra_core::config::AppConfig;
use sra_core::{Error, Platform, ProjectLayout, Result};
use sra_env::runner::{CommandRunner, SystemRunner};

use crate::preflight;
use crate::report;

/// `sra start`
pub fn cmd_start(layout: &ProjectLayout) -> Result<()> {
    run_start(layout, Platform::current(), &SystemRunner, ctrl_c())
}

#[cfg(feature = "web")]
fn ctrl_c() -> impl Future<Output = ()> + Send + 'static {
    sra_web::shutdown_signal()
}

#[cfg(not(feature = "web"))]
fn ctrl_c() -> impl Future<Output = ()> + Send + 'static {
    std::future::pending()
}

/// Preflight, then serve until `shutdown` resolves.
pub fn run_start<F>(
    layout: &ProjectLayout,
    platform: Platform,
    runner: &dyn CommandRunner,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let config = prepare_start(layout, platform, runner)?;
    delegate(config, shutdown)
}

/// Banner, preflight and package activation. Returns the resolved application
/// configuration ready for [`delegate`].
pub fn prepare_start(
    layout: &ProjectLayout,
    platform: Platform,
    runner: &dyn CommandRunner,
) -> Result<AppConfig> {
    report::banner(
        &format!("🌐 Starting {} Web Server...", sra_core::APP_NAME),
        50,
    );

    let readiness = preflight::run_preflight(layout, platform, runner)?;
    report::ok("Virtual environment found");
    report::ok("Configuration file found");

    // Process environment is written here, before the runtime spawns threads.
    preflight::activate_site_packages(&readiness);

    Ok(AppConfig::resolve(&layout.config_file))
}

#[cfg(feature = "web")]
pub fn delegate<F>(config: AppConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    report::ok("Web server loaded successfully");
    report::step("🚀", "Starting web server...");
    report::step(
        "📱",
        &format!(
            "Open your browser and go to: http://localhost:{}",
            config.port
        ),
    );
    report::step("⏹️ ", "Press Ctrl+C to stop the server");
    report::rule(50);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::EntryPointStartError {
            reason: format!("failed to create async runtime: {e}"),
        })?;

    runtime
        .block_on(sra_web::serve(config, shutdown))
        .map_err(|e| Error::EntryPointStartError {
            reason: format!("{e:#}"),
        })
}

#[cfg(not(feature = "web"))]
pub fn delegate<F>(_config: AppConfig, _shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    Err(Error::EntryPointImportError {
        reason: "this build does not include the web server (enable the `web` feature)"
            .to_string(),
    })
}
