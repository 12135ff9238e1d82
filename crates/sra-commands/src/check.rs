//! `sra check` — run the launcher's preflight without starting anything.

use std::path::PathBuf;

use serde::Serialize;
use sra_core::config::{AppConfig, CredentialSource};
use sra_core::{Platform, ProjectLayout, Result};
use sra_env::runner::{CommandRunner, SystemRunner};

use crate::preflight;
use crate::report;

#[derive(Debug, Serialize)]
pub struct ReadinessReport {
    pub ready: bool,
    pub venv_dir: PathBuf,
    pub site_packages: Option<PathBuf>,
    pub config_file: PathBuf,
    pub credential_source: CredentialSource,
}

/// `sra check`
pub fn cmd_check(layout: &ProjectLayout, json: bool) -> Result<()> {
    let readiness = run_check(layout, Platform::current(), &SystemRunner)?;
    if json {
        println!("{}", render_json(&readiness, readiness.ready));
    }
    Ok(())
}

/// Pretty JSON for `value`. A serialization failure still yields a JSON
/// object carrying `ready` and the error, never an empty line.
fn render_json<T: Serialize>(value: &T, ready: bool) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to serialize readiness report");
        serde_json::json!({ "ready": ready, "error": e.to_string() }).to_string()
    })
}

pub fn run_check(
    layout: &ProjectLayout,
    platform: Platform,
    runner: &dyn CommandRunner,
) -> Result<ReadinessReport> {
    report::step("🔍", "Running preflight checks...");
    let readiness = preflight::run_preflight(layout, platform, runner)?;
    report::ok(&format!(
        "Virtual environment found at {}",
        layout.display_relative(&readiness.venv_dir)
    ));
    match readiness.site_packages {
        Some(ref site) => report::ok(&format!(
            "Packages directory {}",
            layout.display_relative(site)
        )),
        None => report::warn("Packages directory not found; run `sra setup` to repair"),
    }
    report::ok(&format!(
        "Configuration file {} is filled in",
        layout.display_relative(&readiness.config_file)
    ));

    let config = AppConfig::resolve(&layout.config_file);
    report::ok(&format!(
        "API key source: {}",
        config.credential_source.describe()
    ));

    Ok(ReadinessReport {
        ready: true,
        venv_dir: readiness.venv_dir,
        site_packages: readiness.site_packages,
        config_file: readiness.config_file,
        credential_source: config.credential_source,
    })
}
