//! Provisioner steps 2-5: virtual environment, pip upgrade, manifest install,
//! configuration file from template.
//!
//! Each step is idempotent and safe to re-run after an interrupted setup.

use std::fs::OpenOptions;
use std::io;

use sra_core::{Error, Platform, ProjectLayout, Result};

use crate::interpreter::Interpreter;
use crate::manifest;
use crate::runner::{CommandRunner, CommandSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvStatus {
    AlreadyPresent,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigStatus {
    AlreadyPresent,
    Created,
    /// No template to copy from; the operator must create the file by hand.
    TemplateMissing,
    /// Copy attempted and failed; reported, never fatal.
    CopyFailed(String),
}

/// Create the virtual environment unless the directory already exists.
/// An existing directory is trusted as-is.
pub fn ensure_environment(
    layout: &ProjectLayout,
    interpreter: &Interpreter,
    runner: &dyn CommandRunner,
) -> Result<EnvStatus> {
    if layout.venv_dir.exists() {
        return Ok(EnvStatus::AlreadyPresent);
    }

    let spec = CommandSpec::new(&interpreter.program)
        .args(["-m", "venv"])
        .arg(layout.venv_dir.as_os_str())
        .current_dir(&layout.root);
    crate::info_log!(command = %spec, "creating virtual environment");

    let out = runner.run(&spec).map_err(|e| Error::EnvironmentCreationError {
        path: layout.venv_dir.clone(),
        reason: e.to_string(),
    })?;
    if !out.success {
        return Err(Error::EnvironmentCreationError {
            path: layout.venv_dir.clone(),
            reason: out.failure_reason(),
        });
    }
    Ok(EnvStatus::Created)
}

/// Upgrade pip inside the environment.
pub fn upgrade_installer(
    layout: &ProjectLayout,
    platform: Platform,
    runner: &dyn CommandRunner,
) -> Result<()> {
    let spec = CommandSpec::new(layout.venv_python(platform))
        .args(["-m", "pip", "install", "--upgrade", "pip"])
        .current_dir(&layout.root);
    crate::info_log!(command = %spec, "upgrading pip");

    let out = runner.run(&spec).map_err(|e| Error::DependencyToolError {
        venv: layout.venv_dir.clone(),
        reason: e.to_string(),
    })?;
    if !out.success {
        return Err(Error::DependencyToolError {
            venv: layout.venv_dir.clone(),
            reason: out.failure_reason(),
        });
    }
    Ok(())
}

/// Install every package in the manifest. Returns the number of requirement lines.
pub fn install_dependencies(
    layout: &ProjectLayout,
    platform: Platform,
    runner: &dyn CommandRunner,
) -> Result<usize> {
    let install_error = |reason: String| Error::DependencyInstallError {
        manifest: layout.manifest.clone(),
        reason,
    };

    let requirements = manifest::read_requirements(&layout.manifest).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            install_error("manifest not found".to_string())
        } else {
            install_error(e.to_string())
        }
    })?;

    let spec = CommandSpec::new(layout.venv_pip(platform))
        .args(["install", "-r"])
        .arg(layout.manifest.as_os_str())
        .current_dir(&layout.root);
    crate::info_log!(command = %spec, packages = requirements.len(), "installing dependencies");

    let out = runner.run(&spec).map_err(|e| install_error(e.to_string()))?;
    if !out.success {
        return Err(install_error(out.failure_reason()));
    }
    Ok(requirements.len())
}

/// Copy the template to the configuration file, byte for byte, only when the
/// configuration file does not exist. Never overwrites.
pub fn materialize_config(layout: &ProjectLayout) -> ConfigStatus {
    if layout.config_file.exists() {
        return ConfigStatus::AlreadyPresent;
    }

    let mut src = match std::fs::File::open(&layout.config_template) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return ConfigStatus::TemplateMissing,
        Err(e) => return ConfigStatus::CopyFailed(e.to_string()),
    };

    // create_new: a file that appeared since the check above is left untouched.
    let mut dst = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&layout.config_file)
    {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return ConfigStatus::AlreadyPresent,
        Err(e) => return ConfigStatus::CopyFailed(e.to_string()),
    };

    match io::copy(&mut src, &mut dst) {
        Ok(bytes) => {
            tracing::debug!(bytes, path = %layout.config_file.display(), "configuration file created");
            ConfigStatus::Created
        }
        Err(e) => {
            // The file is either a full template copy or absent.
            drop(dst);
            if let Err(rm) = std::fs::remove_file(&layout.config_file) {
                tracing::warn!(error = %rm, path = %layout.config_file.display(), "failed to remove partial configuration file");
            }
            ConfigStatus::CopyFailed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RunOutcome;
    use crate::testing::ScriptedRunner;
    use std::fs;
    use std::path::PathBuf;
    use sra_core::PythonVersion;

    fn interpreter() -> Interpreter {
        Interpreter {
            program: PathBuf::from("python3"),
            version: PythonVersion::new(3, 11, 4),
        }
    }

    #[test]
    fn test_existing_venv_is_not_recreated() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        fs::create_dir_all(&layout.venv_dir).unwrap();
        let runner = ScriptedRunner::healthy("3.11.4");

        let status = ensure_environment(&layout, &interpreter(), &runner).unwrap();
        assert_eq!(status, EnvStatus::AlreadyPresent);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_creates_venv_with_base_interpreter() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        let runner = ScriptedRunner::healthy("3.11.4");

        let status = ensure_environment(&layout, &interpreter(), &runner).unwrap();
        assert_eq!(status, EnvStatus::Created);
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, PathBuf::from("python3"));
        assert!(calls[0].has_arg("venv"));
        assert!(layout.venv_dir.exists());
    }

    #[test]
    fn test_venv_failure_maps_to_creation_error() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        let runner = ScriptedRunner::new(|_| Ok(RunOutcome::failed(1, "Permission denied")));

        let err = ensure_environment(&layout, &interpreter(), &runner).unwrap_err();
        match err {
            Error::EnvironmentCreationError { reason, .. } => {
                assert!(reason.contains("Permission denied"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_pip_upgrade_failure_maps_to_tool_error() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        let runner = ScriptedRunner::new(|_| Ok(RunOutcome::failed(2, "")));

        let err = upgrade_installer(&layout, Platform::Posix, &runner).unwrap_err();
        assert!(matches!(err, Error::DependencyToolError { .. }));
        let calls = runner.calls();
        assert_eq!(calls[0].program, layout.venv_python(Platform::Posix));
        assert!(calls[0].has_arg("--upgrade"));
    }

    #[test]
    fn test_missing_manifest_is_install_error_without_running_pip() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        let runner = ScriptedRunner::healthy("3.11.4");

        let err = install_dependencies(&layout, Platform::Posix, &runner).unwrap_err();
        match err {
            Error::DependencyInstallError { manifest, reason } => {
                assert_eq!(manifest, layout.manifest);
                assert_eq!(reason, "manifest not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_install_uses_venv_pip_and_counts_requirements() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        fs::write(&layout.manifest, "flask\n# comment\nopenai\n").unwrap();
        let runner = ScriptedRunner::healthy("3.11.4");

        let count = install_dependencies(&layout, Platform::Posix, &runner).unwrap();
        assert_eq!(count, 2);
        let calls = runner.calls();
        assert_eq!(calls[0].program, layout.venv_pip(Platform::Posix));
        assert!(calls[0].has_arg("-r"));
    }

    #[test]
    fn test_template_copied_byte_for_byte() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        let template = b"# template\r\nAPI_KEY = \"your-openai-api-key-here\"\n\xe2\x9c\x85\n";
        fs::write(&layout.config_template, template).unwrap();

        assert_eq!(materialize_config(&layout), ConfigStatus::Created);
        assert_eq!(fs::read(&layout.config_file).unwrap(), template.to_vec());
    }

    #[test]
    fn test_existing_config_is_preserved() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        fs::write(&layout.config_template, "API_KEY = \"your-openai-api-key-here\"\n").unwrap();
        fs::write(&layout.config_file, "API_KEY = \"sk-custom\"\n").unwrap();

        assert_eq!(materialize_config(&layout), ConfigStatus::AlreadyPresent);
        assert_eq!(
            fs::read_to_string(&layout.config_file).unwrap(),
            "API_KEY = \"sk-custom\"\n"
        );
    }

    #[test]
    fn test_failed_copy_leaves_no_config_behind() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        // Opening a directory succeeds on Unix; reading from it fails mid-copy.
        fs::create_dir_all(&layout.config_template).unwrap();

        assert!(matches!(
            materialize_config(&layout),
            ConfigStatus::CopyFailed(_)
        ));
        assert!(!layout.config_file.exists());

        fs::remove_dir(&layout.config_template).unwrap();
        fs::write(&layout.config_template, "API_KEY = \"your-openai-api-key-here\"\n").unwrap();
        assert_eq!(materialize_config(&layout), ConfigStatus::Created);
        assert_eq!(
            fs::read(&layout.config_file).unwrap(),
            fs::read(&layout.config_template).unwrap()
        );
    }

    #[test]
    fn test_missing_template_is_reported_not_created() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(tmp.path());

        assert_eq!(materialize_config(&layout), ConfigStatus::TemplateMissing);
        assert!(!layout.config_file.exists());
    }
}
