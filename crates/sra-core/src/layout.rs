//! On-disk artifacts shared by the provisioner and the launcher.

use std::path::{Path, PathBuf};

use crate::config::schema::{
    DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TEMPLATE, DEFAULT_REQUIREMENTS, DEFAULT_VENV_DIR,
};
use crate::config::PathsConfig;
use crate::runtime::{self, Platform, PythonVersion};

/// Resolved locations of the runtime environment, manifest and configuration files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub venv_dir: PathBuf,
    pub manifest: PathBuf,
    pub config_file: PathBuf,
    pub config_template: PathBuf,
}

impl ProjectLayout {
    /// Default file names under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_overrides(root, &PathsConfig::default())
    }

    /// Default file names, replaced by any override present in `paths`.
    /// Relative overrides resolve against `root`.
    pub fn with_overrides(root: impl Into<PathBuf>, paths: &PathsConfig) -> Self {
        let root = root.into();
        let at = |value: &Option<String>, default: &str| {
            let p = PathBuf::from(value.as_deref().unwrap_or(default));
            if p.is_absolute() {
                p
            } else {
                root.join(p)
            }
        };
        Self {
            venv_dir: at(&paths.venv_dir, DEFAULT_VENV_DIR),
            manifest: at(&paths.requirements, DEFAULT_REQUIREMENTS),
            config_file: at(&paths.config_file, DEFAULT_CONFIG_FILE),
            config_template: at(&paths.config_template, DEFAULT_CONFIG_TEMPLATE),
            root,
        }
    }

    /// Resolve from an explicit directory, else `SRA_PROJECT_DIR`, else the
    /// current directory. Relative directories are made absolute.
    pub fn discover(project_dir: Option<&Path>) -> Self {
        let paths = PathsConfig::from_env();
        Self::with_overrides(resolve_root(project_dir, &paths), &paths)
    }

    pub fn venv_python(&self, platform: Platform) -> PathBuf {
        self.venv_dir.join(runtime::venv_python(platform))
    }

    pub fn venv_pip(&self, platform: Platform) -> PathBuf {
        self.venv_dir.join(runtime::venv_pip(platform))
    }

    pub fn site_packages(&self, platform: Platform, version: PythonVersion) -> PathBuf {
        self.venv_dir.join(runtime::site_packages_dir(platform, version))
    }

    pub fn pyvenv_cfg(&self) -> PathBuf {
        self.venv_dir.join("pyvenv.cfg")
    }

    /// Name of the environment directory as shown in operator instructions.
    pub fn venv_display_name(&self) -> String {
        self.display_relative(&self.venv_dir)
    }

    /// `path` relative to the project root when possible, for operator output.
    pub fn display_relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Project root: explicit directory, else `SRA_PROJECT_DIR`, else the current
/// directory. Always absolute.
pub fn resolve_root(project_dir: Option<&Path>, paths: &PathsConfig) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    project_dir
        .map(Path::to_path_buf)
        .or_else(|| paths.project_dir.as_ref().map(PathBuf::from))
        .map(|p| if p.is_absolute() { p } else { cwd.join(p) })
        .unwrap_or(cwd)
}
