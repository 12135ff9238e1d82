//! Dependency manifest (`requirements.txt`).

use std::path::Path;

/// Requirement lines of a manifest: trimmed, without blanks and comments.
/// Option lines such as `-r other.txt` are kept; pip interprets them.
pub fn read_requirements(path: &Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_requirements(&content))
}

pub fn parse_requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}
