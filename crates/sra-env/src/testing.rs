//! Scripted [`CommandRunner`] for tests.

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;

use crate::runner::{CommandRunner, CommandSpec, RunOutcome};

type Responder = Box<dyn Fn(&CommandSpec) -> io::Result<RunOutcome>>;

/// Records every command and answers with a caller-supplied responder.
pub struct ScriptedRunner {
    calls: RefCell<Vec<CommandSpec>>,
    responder: Responder,
}

impl ScriptedRunner {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&CommandSpec) -> io::Result<RunOutcome> + 'static,
    {
        Self {
            calls: RefCell::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Behaves like a working toolchain: `--version` reports `version`,
    /// `-m venv DIR` creates `DIR`, everything else succeeds.
    pub fn healthy(version: &str) -> Self {
        let version = version.to_string();
        Self::new(move |spec| {
            if spec.has_arg("--version") {
                return Ok(RunOutcome {
                    stdout: format!("Python {version}\n"),
                    ..RunOutcome::ok()
                });
            }
            if spec.has_arg("venv") {
                if let Some(dir) = spec.args.last() {
                    std::fs::create_dir_all(PathBuf::from(dir))?;
                }
            }
            Ok(RunOutcome::ok())
        })
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Number of recorded commands containing argument `needle`.
    pub fn count_with_arg(&self, needle: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.has_arg(needle)).count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<RunOutcome> {
        self.calls.borrow_mut().push(spec.clone());
        (self.responder)(spec)
    }
}
