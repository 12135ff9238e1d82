pub mod config;
pub mod error;
pub mod layout;
pub mod runtime;

pub use error::{Error, Result};
pub use layout::ProjectLayout;
pub use runtime::{Platform, PythonVersion, MIN_PYTHON};

/// Display name used by the status page, health payload and CLI banners.
pub const APP_NAME: &str = "Safety Report Analyzer";

/// Version string reported by the health endpoint.
pub const APP_VERSION: &str = "1.0.0";

/// Literal template value that marks a configuration file as not yet edited.
pub const PLACEHOLDER_API_KEY: &str = "your-openai-api-key-here";
