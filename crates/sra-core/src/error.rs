//! Error taxonomy shared by `setup`, `start` and `check`.
//!
//! Every variant is terminal for the command that raised it. The command layer
//! prints the error line followed by [`Error::remediation`] and exits with 1.

use std::path::PathBuf;

use thiserror::Error;

use crate::runtime::PythonVersion;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Python {required} or higher is required (detected: {detected})")]
    UnsupportedRuntime {
        detected: String,
        required: PythonVersion,
    },

    #[error("Failed to create virtual environment at {}: {reason}", path.display())]
    EnvironmentCreationError { path: PathBuf, reason: String },

    #[error("Failed to upgrade pip inside {}: {reason}", venv.display())]
    DependencyToolError { venv: PathBuf, reason: String },

    #[error("Failed to install dependencies from {}: {reason}", manifest.display())]
    DependencyInstallError { manifest: PathBuf, reason: String },

    #[error("Virtual environment not found at {}", path.display())]
    EnvironmentMissing { path: PathBuf },

    #[error("{} not found", path.display())]
    ConfigurationMissing { path: PathBuf, template: PathBuf },

    #[error("{} still contains the placeholder API key", path.display())]
    ConfigurationIncomplete { path: PathBuf },

    #[error("Error reading {}: {source}", path.display())]
    ConfigurationUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load the web server entry point: {reason}")]
    EntryPointImportError { reason: String },

    #[error("Error starting web server: {reason}")]
    EntryPointStartError { reason: String },
}

impl Error {
    /// Actionable next step shown to the operator under the error line.
    pub fn remediation(&self) -> String {
        match self {
            Error::UnsupportedRuntime { required, .. } => format!(
                "Install Python {required}+ or point SRA_PYTHON at a supported interpreter"
            ),
            Error::EnvironmentCreationError { .. } => {
                "Check directory permissions and free disk space, then run `sra setup` again"
                    .to_string()
            }
            Error::DependencyToolError { .. } => {
                "Check your network connection, then run `sra setup` again".to_string()
            }
            Error::DependencyInstallError { manifest, .. } => format!(
                "Fix the packages listed in {} and run `sra setup` again",
                manifest.display()
            ),
            Error::EnvironmentMissing { .. } => "Please run setup first: sra setup".to_string(),
            Error::ConfigurationMissing { path, template } => format!(
                "Please copy {} to {} and add your API key",
                template.display(),
                path.display()
            ),
            Error::ConfigurationIncomplete { path } => format!(
                "Please update {} with your actual OpenAI API key",
                path.display()
            ),
            Error::ConfigurationUnreadable { path, .. } => format!(
                "Make sure {} is a readable text file",
                path.display()
            ),
            Error::EntryPointImportError { .. } => {
                "Please install dependencies (`sra setup`) and rebuild with the `web` feature"
                    .to_string()
            }
            Error::EntryPointStartError { .. } => {
                "Make sure port 5000 is free and try again".to_string()
            }
        }
    }

    /// Short variant name used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnsupportedRuntime { .. } => "UnsupportedRuntime",
            Error::EnvironmentCreationError { .. } => "EnvironmentCreationError",
            Error::DependencyToolError { .. } => "DependencyToolError",
            Error::DependencyInstallError { .. } => "DependencyInstallError",
            Error::EnvironmentMissing { .. } => "EnvironmentMissing",
            Error::ConfigurationMissing { .. } => "ConfigurationMissing",
            Error::ConfigurationIncomplete { .. } => "ConfigurationIncomplete",
            Error::ConfigurationUnreadable { .. } => "ConfigurationUnreadable",
            Error::EntryPointImportError { .. } => "EntryPointImportError",
            Error::EntryPointStartError { .. } => "EntryPointStartError",
        }
    }
}
