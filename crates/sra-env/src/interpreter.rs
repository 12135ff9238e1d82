//! Locate the base interpreter and check its version.

use std::path::{Path, PathBuf};

use sra_core::{Error, PythonVersion, Result};

use crate::runner::{CommandRunner, CommandSpec};

/// A base interpreter that passed the version check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    pub program: PathBuf,
    pub version: PythonVersion,
}

/// Find the interpreter: explicit override (name or path) first, then
/// `python3`, then `python` on `PATH`.
pub fn locate(override_program: Option<&str>) -> Option<PathBuf> {
    if let Some(program) = override_program {
        return Some(which::which(program).unwrap_or_else(|_| PathBuf::from(program)));
    }
    ["python3", "python"]
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// Run `<program> --version` and parse the result. Python 2 prints to stderr.
pub fn probe_version(
    runner: &dyn CommandRunner,
    program: &Path,
) -> std::result::Result<PythonVersion, String> {
    let spec = CommandSpec::new(program).arg("--version").captured();
    let out = runner
        .run(&spec)
        .map_err(|e| format!("failed to run {}: {e}", program.display()))?;
    if !out.success {
        return Err(format!("{spec} failed: {}", out.failure_reason()));
    }
    let text = format!("{}\n{}", out.stdout, out.stderr);
    PythonVersion::parse_loose(&text)
        .ok_or_else(|| format!("unrecognized version output: {}", text.trim()))
}

/// Provisioner step 1: the interpreter must exist and be at least `minimum`.
pub fn check_interpreter(
    runner: &dyn CommandRunner,
    program: Option<PathBuf>,
    minimum: PythonVersion,
) -> Result<Interpreter> {
    let Some(program) = program else {
        return Err(Error::UnsupportedRuntime {
            detected: "no python3 or python found in PATH".to_string(),
            required: minimum,
        });
    };

    let version = probe_version(runner, &program).map_err(|reason| {
        Error::UnsupportedRuntime {
            detected: reason,
            required: minimum,
        }
    })?;

    if !version.satisfies(&minimum) {
        return Err(Error::UnsupportedRuntime {
            detected: version.to_string(),
            required: minimum,
        });
    }

    crate::info_log!(program = %program.display(), %version, "interpreter accepted");
    Ok(Interpreter { program, version })
}
