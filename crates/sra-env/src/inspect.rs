//! Read-only inspection of an existing environment, used by the launcher.

use std::path::PathBuf;

use sra_core::runtime::pyvenv_version;
use sra_core::{Platform, ProjectLayout, PythonVersion};

use crate::interpreter::probe_version;
use crate::runner::CommandRunner;

/// Interpreter version of the environment: `pyvenv.cfg` first, then the
/// environment's own interpreter. `None` when neither answers.
pub fn environment_version(
    layout: &ProjectLayout,
    platform: Platform,
    runner: &dyn CommandRunner,
) -> Option<PythonVersion> {
    if let Ok(content) = std::fs::read_to_string(layout.pyvenv_cfg()) {
        if let Some(version) = pyvenv_version(&content) {
            return Some(version);
        }
    }

    let python = layout.venv_python(platform);
    if !python.exists() {
        return None;
    }
    match probe_version(runner, &python) {
        Ok(version) => Some(version),
        Err(reason) => {
            tracing::warn!(%reason, "could not determine environment interpreter version");
            None
        }
    }
}

/// Existing package directory of the environment, if it can be located.
pub fn locate_site_packages(
    layout: &ProjectLayout,
    platform: Platform,
    runner: &dyn CommandRunner,
) -> Option<PathBuf> {
    let dir = match platform {
        // Windows layout does not depend on the version.
        Platform::Windows => layout.site_packages(platform, PythonVersion::new(0, 0, 0)),
        Platform::Posix => {
            let version = environment_version(layout, platform, runner)?;
            layout.site_packages(platform, version)
        }
    };
    dir.is_dir().then_some(dir)
}
