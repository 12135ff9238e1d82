//! Environment variable keys. Primary names use the `SRA_` prefix.

/// Project root and file locations
pub mod paths {
    pub const SRA_PROJECT_DIR: &str = "SRA_PROJECT_DIR";
    pub const SRA_VENV_DIR: &str = "SRA_VENV_DIR";
    pub const SRA_REQUIREMENTS: &str = "SRA_REQUIREMENTS";
    pub const SRA_CONFIG_FILE: &str = "SRA_CONFIG_FILE";
    pub const SRA_CONFIG_TEMPLATE: &str = "SRA_CONFIG_TEMPLATE";
}

/// Interpreter selection
pub mod runtime {
    pub const SRA_PYTHON: &str = "SRA_PYTHON";
    pub const PYTHON_ALIASES: &[&str] = &["PYTHON"];

    /// Module search path handed to interpreters spawned by the application.
    pub const PYTHONPATH: &str = "PYTHONPATH";
}

/// API credential fallback when the configuration file has none
pub mod credential {
    pub const SRA_API_KEY: &str = "SRA_API_KEY";
    pub const API_KEY_ALIASES: &[&str] = &["OPENAI_API_KEY"];

    /// Key looked up inside the configuration file.
    pub const FILE_KEY: &str = "API_KEY";
}

/// Observability and logging
pub mod observability {
    pub const SRA_QUIET: &str = "SRA_QUIET";
    pub const SRA_LOG_LEVEL: &str = "SRA_LOG_LEVEL";
    pub const SRA_LOG_JSON: &str = "SRA_LOG_JSON";
}
