//! Structured configuration grouped by concern.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::env_keys::{credential, observability as obv_keys, paths, runtime};
use super::file::ConfigFile;
use super::loader::{env_bool, env_lookup, env_optional, env_or};

pub const DEFAULT_VENV_DIR: &str = ".venv";
pub const DEFAULT_REQUIREMENTS: &str = "requirements.txt";
pub const DEFAULT_CONFIG_FILE: &str = "config.env";
pub const DEFAULT_CONFIG_TEMPLATE: &str = "config.example.env";

/// Web server port. Not configurable: the status page and docs point at it.
pub const SERVER_PORT: u16 = 5000;
pub const SERVER_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// File-name overrides and interpreter selection, read from the environment.
#[derive(Debug, Clone, Default)]
pub struct PathsConfig {
    pub project_dir: Option<String>,
    pub venv_dir: Option<String>,
    pub requirements: Option<String>,
    pub config_file: Option<String>,
    pub config_template: Option<String>,
    pub python: Option<String>,
}

impl PathsConfig {
    pub fn from_env() -> Self {
        Self {
            project_dir: env_optional(paths::SRA_PROJECT_DIR, &[]),
            venv_dir: env_optional(paths::SRA_VENV_DIR, &[]),
            requirements: env_optional(paths::SRA_REQUIREMENTS, &[]),
            config_file: env_optional(paths::SRA_CONFIG_FILE, &[]),
            config_template: env_optional(paths::SRA_CONFIG_TEMPLATE, &[]),
            python: env_optional(runtime::SRA_PYTHON, runtime::PYTHON_ALIASES),
        }
    }
}

/// Logging: quiet, level filter, JSON output.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| Self {
            quiet: env_bool(obv_keys::SRA_QUIET, &[], false),
            log_level: env_or(obv_keys::SRA_LOG_LEVEL, &[], || "sra=info".to_string()),
            log_json: env_bool(obv_keys::SRA_LOG_JSON, &[], false),
        })
    }
}

/// Where the API credential came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CredentialSource {
    ConfigFile { path: PathBuf },
    Environment { var: String },
    Missing,
}

impl CredentialSource {
    pub fn describe(&self) -> String {
        match self {
            CredentialSource::ConfigFile { path } => format!("configuration file {}", path.display()),
            CredentialSource::Environment { var } => format!("environment variable {var}"),
            CredentialSource::Missing => "none".to_string(),
        }
    }
}

/// Application settings built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub credential_source: CredentialSource,
    pub settings: ConfigFile,
    pub host: IpAddr,
    pub port: u16,
    pub debug: bool,
}

impl AppConfig {
    /// Two-stage credential resolution: configuration file first, then
    /// `SRA_API_KEY` / `OPENAI_API_KEY`.
    pub fn resolve(config_file: &Path) -> Self {
        let env_credential = env_lookup(credential::SRA_API_KEY, credential::API_KEY_ALIASES);
        Self::resolve_from(config_file, env_credential)
    }

    /// Same as [`AppConfig::resolve`] with the environment stage supplied by the caller.
    pub fn resolve_from(config_file: &Path, env_credential: Option<(String, String)>) -> Self {
        let settings = match ConfigFile::load(config_file) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::debug!(path = %config_file.display(), error = %e, "configuration file not loaded");
                ConfigFile::default()
            }
        };

        let file_key = settings
            .get(credential::FILE_KEY)
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != crate::PLACEHOLDER_API_KEY)
            .map(String::from);

        let (api_key, credential_source) = match (file_key, env_credential) {
            (Some(key), _) => (
                Some(key),
                CredentialSource::ConfigFile {
                    path: config_file.to_path_buf(),
                },
            ),
            (None, Some((var, key))) => (Some(key), CredentialSource::Environment { var }),
            (None, None) => (None, CredentialSource::Missing),
        };

        tracing::info!(source = %credential_source.describe(), "resolved API credential");

        Self {
            api_key,
            credential_source,
            settings,
            host: SERVER_HOST,
            port: SERVER_PORT,
            debug: true,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// A key is configured when present and not the template placeholder.
    pub fn api_key_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.is_empty() && k != crate::PLACEHOLDER_API_KEY)
            .unwrap_or(false)
    }
}
