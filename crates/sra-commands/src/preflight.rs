//! Launcher gate: `Start → CheckEnv → CheckConfig → Delegate`.
//!
//! Checks run in order and short-circuit; configuration is never inspected
//! when the environment is missing.

use std::io;
use std::path::PathBuf;

use sra_core::config::{env_keys, prepend_path_var};
use sra_core::{Error, Platform, ProjectLayout, Result, PLACEHOLDER_API_KEY};
use sra_env::inspect;
use sra_env::runner::CommandRunner;

/// Outcome of a passed preflight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pub venv_dir: PathBuf,
    /// Package directory of the environment, when it could be located.
    pub site_packages: Option<PathBuf>,
    pub config_file: PathBuf,
}

/// CheckEnv: the environment directory must exist.
pub fn check_environment(
    layout: &ProjectLayout,
    platform: Platform,
    runner: &dyn CommandRunner,
) -> Result<Option<PathBuf>> {
    if !layout.venv_dir.exists() {
        return Err(Error::EnvironmentMissing {
            path: layout.venv_dir.clone(),
        });
    }
    let site_packages = inspect::locate_site_packages(layout, platform, runner);
    if site_packages.is_none() {
        tracing::debug!(venv = %layout.venv_dir.display(), "site-packages not found");
    }
    Ok(site_packages)
}

/// CheckConfig: the configuration file must exist, be readable and no longer
/// contain the template placeholder.
pub fn check_configuration(layout: &ProjectLayout) -> Result<()> {
    let path = &layout.config_file;
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::ConfigurationMissing {
                path: path.clone(),
                template: layout.config_template.clone(),
            })
        }
        Err(source) => {
            return Err(Error::ConfigurationUnreadable {
                path: path.clone(),
                source,
            })
        }
    };
    if content.contains(PLACEHOLDER_API_KEY) {
        return Err(Error::ConfigurationIncomplete { path: path.clone() });
    }
    Ok(())
}

/// Both gating checks, in order.
pub fn run_preflight(
    layout: &ProjectLayout,
    platform: Platform,
    runner: &dyn CommandRunner,
) -> Result<Readiness> {
    let site_packages = check_environment(layout, platform, runner)?;
    check_configuration(layout)?;
    Ok(Readiness {
        venv_dir: layout.venv_dir.clone(),
        site_packages,
        config_file: layout.config_file.clone(),
    })
}

/// Put the environment's packages first on `PYTHONPATH` for interpreters the
/// application spawns. Must run before any thread is started.
pub fn activate_site_packages(readiness: &Readiness) {
    if let Some(ref site) = readiness.site_packages {
        let value = prepend_path_var(env_keys::runtime::PYTHONPATH, site);
        tracing::debug!(pythonpath = %value, "environment packages activated");
    }
}
