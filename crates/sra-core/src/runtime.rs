//! Interpreter versions and the platform-specific layout of a virtual environment.
//!
//! Everything here is pure: paths are computed relative to the environment
//! directory and can be tested without touching the filesystem.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Oldest interpreter the provisioner accepts.
pub const MIN_PYTHON: PythonVersion = PythonVersion::new(3, 8, 0);

/// Directory layout family of a virtual environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// `Scripts\python.exe`, `Lib\site-packages`
    Windows,
    /// `bin/python`, `lib/pythonX.Y/site-packages`
    Posix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Posix => "posix",
        }
    }
}

/// Interpreter version. A missing patch component is treated as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PythonVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the first `X.Y[.Z]` from free-form output such as
    /// `Python 3.11.4` or `3.12.0rc1`.
    pub fn parse_loose(text: &str) -> Option<Self> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("version pattern is valid")
        });
        let caps = re.captures(text)?;
        let major = caps.get(1)?.as_str().parse().ok()?;
        let minor = caps.get(2)?.as_str().parse().ok()?;
        let patch = caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        Some(Self::new(major, minor, patch))
    }

    pub fn satisfies(&self, minimum: &PythonVersion) -> bool {
        self >= minimum
    }
}

impl FromStr for PythonVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_loose(s).ok_or_else(|| format!("not a Python version: {s:?}"))
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}", self.major, self.minor)
        } else {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
        }
    }
}

impl Serialize for PythonVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Package directory of an environment, relative to the environment root.
pub fn site_packages_dir(platform: Platform, version: PythonVersion) -> PathBuf {
    match platform {
        Platform::Windows => PathBuf::from("Lib").join("site-packages"),
        Platform::Posix => PathBuf::from("lib")
            .join(format!("python{}.{}", version.major, version.minor))
            .join("site-packages"),
    }
}

/// Interpreter inside an environment, relative to the environment root.
pub fn venv_python(platform: Platform) -> PathBuf {
    match platform {
        Platform::Windows => PathBuf::from("Scripts").join("python.exe"),
        Platform::Posix => PathBuf::from("bin").join("python"),
    }
}

/// Package installer inside an environment, relative to the environment root.
pub fn venv_pip(platform: Platform) -> PathBuf {
    match platform {
        Platform::Windows => PathBuf::from("Scripts").join("pip.exe"),
        Platform::Posix => PathBuf::from("bin").join("pip"),
    }
}

/// Shell command an operator types to activate the environment.
pub fn activate_command(platform: Platform, venv_name: &str) -> String {
    match platform {
        Platform::Windows => format!("{venv_name}\\Scripts\\activate.bat"),
        Platform::Posix => format!("source {venv_name}/bin/activate"),
    }
}

/// Read the interpreter version recorded in a `pyvenv.cfg` file.
///
/// `version_info` (newer venv) wins over `version` (older venv / virtualenv).
pub fn pyvenv_version(content: &str) -> Option<PythonVersion> {
    let mut version = None;
    let mut version_info = None;
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            "version_info" => version_info = PythonVersion::parse_loose(value),
            "version" => version = PythonVersion::parse_loose(value),
            _ => {}
        }
    }
    version_info.or(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_packages_windows_ignores_version() {
        let v = PythonVersion::new(3, 11, 4);
        assert_eq!(
            site_packages_dir(Platform::Windows, v),
            PathBuf::from("Lib").join("site-packages")
        );
    }

    #[test]
    fn test_site_packages_posix_uses_major_minor() {
        let v = PythonVersion::new(3, 11, 4);
        assert_eq!(
            site_packages_dir(Platform::Posix, v),
            PathBuf::from("lib").join("python3.11").join("site-packages")
        );
    }

    #[test]
    fn test_parse_loose_variants() {
        assert_eq!(
            PythonVersion::parse_loose("Python 3.11.4"),
            Some(PythonVersion::new(3, 11, 4))
        );
        assert_eq!(
            PythonVersion::parse_loose("3.12.0rc1"),
            Some(PythonVersion::new(3, 12, 0))
        );
        assert_eq!(
            PythonVersion::parse_loose("3.9"),
            Some(PythonVersion::new(3, 9, 0))
        );
        assert_eq!(PythonVersion::parse_loose("Python"), None);
        assert!("garbage".parse::<PythonVersion>().is_err());
    }

    #[test]
    fn test_ordering_against_minimum() {
        let old: PythonVersion = "3.7.9".parse().unwrap();
        let exact: PythonVersion = "3.8".parse().unwrap();
        let newer: PythonVersion = "3.10.1".parse().unwrap();
        assert!(old < exact);
        assert_eq!(exact, PythonVersion::new(3, 8, 0));
        assert!(exact < newer);
        assert!(!old.satisfies(&MIN_PYTHON));
        assert!(exact.satisfies(&MIN_PYTHON));
        assert!(newer.satisfies(&MIN_PYTHON));
    }

    #[test]
    fn test_display_omits_zero_patch() {
        assert_eq!(MIN_PYTHON.to_string(), "3.8");
        assert_eq!(PythonVersion::new(3, 11, 4).to_string(), "3.11.4");
        assert_eq!(
            serde_json::to_string(&PythonVersion::new(3, 12, 1)).unwrap(),
            "\"3.12.1\""
        );
    }

    #[test]
    fn test_activate_command_per_platform() {
        assert_eq!(
            activate_command(Platform::Posix, ".venv"),
            "source .venv/bin/activate"
        );
        assert_eq!(
            activate_command(Platform::Windows, ".venv"),
            ".venv\\Scripts\\activate.bat"
        );
    }

    #[test]
    fn test_pyvenv_version_prefers_version_info() {
        let cfg = "home = /usr/bin\ninclude-system-site-packages = false\nversion = 3.10.2\nversion_info = 3.11.4.final.0\n";
        assert_eq!(pyvenv_version(cfg), Some(PythonVersion::new(3, 11, 4)));
        assert_eq!(
            pyvenv_version("version = 3.9.18\n"),
            Some(PythonVersion::new(3, 9, 18))
        );
        assert_eq!(pyvenv_version("home = /usr/bin\n"), None);
    }
}
