//! `sra` commands.
//!
//!   setup — provision interpreter check, .venv, pip, dependencies, config file
//!   start — preflight checks, then hand off to the web server
//!   check — preflight checks only
//!
//! Commands return `sra_core::Error`; the binary prints it with its
//! remediation hint and maps it to exit code 1.

pub mod check;
pub mod preflight;
pub mod report;
pub mod setup;
pub mod start;
