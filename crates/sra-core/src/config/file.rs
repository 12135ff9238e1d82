//! Key-value configuration file (`config.env`, `.env`).
//!
//! Accepted forms, one per line:
//!
//! ```text
//! # comment
//! API_KEY = "sk-..."   # trailing comment
//! MODEL=gpt-4o
//! ```

use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    entries: Vec<(String, String)>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, raw)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            let value = parse_value(raw.trim());
            // Later assignments win, as they would in a script.
            entries.retain(|(k, _)| k != key);
            entries.push((key.to_string(), value));
        }
        Self { entries }
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        Ok(Self::parse(&std::fs::read_to_string(path)?))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_value(raw: &str) -> String {
    for quote in ['"', '\''] {
        if let Some(rest) = raw.strip_prefix(quote) {
            return match rest.find(quote) {
                Some(end) => rest[..end].to_string(),
                None => rest.to_string(),
            };
        }
    }
    match raw.find('#') {
        Some(pos) => raw[..pos].trim_end().to_string(),
        None => raw.to_string(),
    }
}
