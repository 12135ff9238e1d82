//! Operator-facing status lines on stderr.

use sra_core::Error;

pub fn banner(title: &str, width: usize) {
    eprintln!("{title}");
    eprintln!("{}", "=".repeat(width));
}

pub fn rule(width: usize) {
    eprintln!("{}", "=".repeat(width));
}

pub fn ok(msg: &str) {
    eprintln!("✅ {msg}");
}

pub fn step(icon: &str, msg: &str) {
    eprintln!("{icon} {msg}");
}

pub fn warn(msg: &str) {
    eprintln!("⚠️  {msg}");
}

/// Error line plus its remediation hint.
pub fn failure(err: &Error) {
    eprintln!("❌ {err}");
    eprintln!("   {}", err.remediation());
    tracing::debug!(kind = err.kind(), error = ?err, "command failed");
}
