//! Environment variable helpers.
//!
//! Fallback chains live here so callers never repeat `or_else` over aliases.
//! The public readers and writers wrap pure functions over an injected lookup,
//! so tests never touch the process environment.

use std::env;
use std::ffi::OsStr;
use std::path::Path;

use super::file::ConfigFile;

/// Load `<dir>/.env` into the process environment without overriding
/// variables that are already set. Missing file is not an error.
pub fn load_dotenv_from_dir(dir: &Path) {
    let path = dir.join(".env");
    let Ok(content) = std::fs::read_to_string(&path) else {
        return;
    };
    let pending = dotenv_pending(&content, |key| env::var_os(key).is_some());
    for (key, value) in &pending {
        set_env_var(key, value);
    }
    tracing::debug!(path = %path.display(), loaded = pending.len(), "loaded .env");
}

/// Entries of a `.env` body that are not already set according to `is_set`.
fn dotenv_pending<F>(content: &str, is_set: F) -> Vec<(String, String)>
where
    F: Fn(&str) -> bool,
{
    ConfigFile::parse(content)
        .iter()
        .filter(|(key, _)| !is_set(key))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Read the primary variable or the first set alias, falling back to `default`.
pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    env_optional(primary, aliases).unwrap_or_else(default)
}

/// Read the primary variable or the first set alias. Blank values count as unset.
pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    env_lookup(primary, aliases).map(|(_, value)| value)
}

/// Like [`env_optional`] but also returns which variable supplied the value.
pub fn env_lookup(primary: &str, aliases: &[&str]) -> Option<(String, String)> {
    lookup_with(primary, aliases, |key| env::var(key).ok())
}

fn lookup_with<F>(primary: &str, aliases: &[&str], get: F) -> Option<(String, String)>
where
    F: Fn(&str) -> Option<String>,
{
    std::iter::once(primary)
        .chain(aliases.iter().copied())
        .find_map(|key| {
            let value = get(key)?;
            let value = value.trim();
            if value.is_empty() {
                None
            } else {
                Some((key.to_string(), value.to_string()))
            }
        })
}

/// Parse a boolean variable: `0/false/no/off` are false, anything else set is true.
pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    let v = env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()));
    parse_bool(v.as_deref(), default)
}

fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}

// SAFETY contract for the two writers below: call only before any thread
// (including the tokio runtime) is spawned.

/// Set a single process environment variable.
#[allow(unsafe_code, unused_unsafe)]
pub fn set_env_var(key: &str, value: &str) {
    unsafe { env::set_var(key, value) };
}

/// Prepend `entry` to a path-list variable such as `PYTHONPATH`.
/// Returns the new value. An existing occurrence moves to the front.
pub fn prepend_path_var(key: &str, entry: &Path) -> String {
    let joined = prepend_path_list(entry, env::var_os(key).as_deref());
    set_env_var(key, &joined);
    joined
}

fn prepend_path_list(entry: &Path, existing: Option<&OsStr>) -> String {
    let mut parts: Vec<std::path::PathBuf> = vec![entry.to_path_buf()];
    if let Some(existing) = existing {
        parts.extend(env::split_paths(existing).filter(|p| p != entry));
    }
    env::join_paths(parts)
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|_| entry.to_string_lossy().to_string())
}
