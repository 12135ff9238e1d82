//! Runtime environment provisioning.
//!
//! Commands pass a [`sra_core::ProjectLayout`] and a [`runner::CommandRunner`];
//! this crate never prints operator-facing text, it returns outcomes and
//! `sra_core::Error` values for the command layer to report.

pub mod builder;
pub mod inspect;
pub mod interpreter;
pub mod log;
pub mod manifest;
pub mod runner;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
