//! Configuration layer.
//!
//! All environment variable reads go through this module; the rest of the
//! workspace consumes structured values (`PathsConfig`, `ObservabilityConfig`,
//! `AppConfig`) instead of calling `std::env::var` directly.
//!
//! - `env_keys`: key constants and aliases
//! - `loader`: `env_or` / `env_optional` / `env_bool`, `.env` loading, process env writes
//! - `file`: parser for the key-value configuration file
//! - `schema`: structured configs and credential resolution

pub mod env_keys;
pub mod file;
pub mod loader;
pub mod schema;

pub use file::ConfigFile;
pub use loader::{
    env_bool, env_lookup, env_optional, env_or, load_dotenv_from_dir, prepend_path_var,
    set_env_var,
};
pub use schema::{AppConfig, CredentialSource, ObservabilityConfig, PathsConfig};
