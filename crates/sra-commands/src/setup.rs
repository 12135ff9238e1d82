//! `sra setup` — bring a project from nothing to ready-to-run.
//!
//! Flow (strict order, first fatal error aborts, nothing is rolled back):
//!   1. Interpreter version check
//!   2. .venv (skipped when present)
//!   3. pip upgrade inside .venv
//!   4. pip install -r requirements.txt
//!   5. config file from template (skipped when present, warning when no template)

use std::path::PathBuf;

use sra_core::config::PathsConfig;
use sra_core::runtime::activate_command;
use sra_core::{Platform, ProjectLayout, Result, MIN_PYTHON};
use sra_env::builder::{self, ConfigStatus, EnvStatus};
use sra_env::interpreter::{self, Interpreter};
use sra_env::runner::{CommandRunner, SystemRunner};

use crate::report;

#[derive(Debug)]
pub struct SetupSummary {
    pub interpreter: Interpreter,
    pub environment: EnvStatus,
    pub requirements: usize,
    pub config: ConfigStatus,
}

/// `sra setup`
pub fn cmd_setup(layout: &ProjectLayout) -> Result<()> {
    let python = interpreter::locate(PathsConfig::from_env().python.as_deref());
    run_setup(layout, Platform::current(), &SystemRunner, python)?;
    Ok(())
}

pub fn run_setup(
    layout: &ProjectLayout,
    platform: Platform,
    runner: &dyn CommandRunner,
    python: Option<PathBuf>,
) -> Result<SetupSummary> {
    report::banner(&format!("🛡️ {} Setup", sra_core::APP_NAME), 40);

    // Step 1
    let interp = interpreter::check_interpreter(runner, python, MIN_PYTHON)?;
    report::ok(&format!("Python {} detected", interp.version));

    // Step 2
    if !layout.venv_dir.exists() {
        report::step("📦", "Creating virtual environment...");
    }
    let environment = builder::ensure_environment(layout, &interp, runner)?;
    match environment {
        EnvStatus::AlreadyPresent => report::ok("Virtual environment already exists"),
        EnvStatus::Created => report::ok("Virtual environment created"),
    }

    // Step 3
    report::step("📦", "Upgrading pip...");
    builder::upgrade_installer(layout, platform, runner)?;
    report::ok("pip is up to date");

    // Step 4
    let manifest_name = layout.display_relative(&layout.manifest);
    report::step("📦", &format!("Installing dependencies from {manifest_name}..."));
    let requirements = builder::install_dependencies(layout, platform, runner)?;
    report::ok(&format!(
        "Dependencies installed successfully ({requirements} requirement(s))"
    ));

    // Step 5
    let config_name = layout.display_relative(&layout.config_file);
    let template_name = layout.display_relative(&layout.config_template);
    let config = builder::materialize_config(layout);
    match &config {
        ConfigStatus::AlreadyPresent => report::ok(&format!("{config_name} already exists")),
        ConfigStatus::Created => report::ok(&format!(
            "{config_name} created from {template_name} - please add your OpenAI API key"
        )),
        ConfigStatus::TemplateMissing => report::warn(&format!(
            "{template_name} not found - please create {config_name} manually"
        )),
        ConfigStatus::CopyFailed(reason) => {
            report::warn(&format!("Failed to create {config_name}: {reason}"))
        }
    }
    tracing::info!(
        environment = ?environment,
        requirements,
        config = ?config,
        "setup complete"
    );

    eprintln!();
    report::rule(40);
    eprintln!("🎉 Setup completed successfully!");
    print_next_steps(layout, platform);

    Ok(SetupSummary {
        interpreter: interp,
        environment,
        requirements,
        config,
    })
}

fn print_next_steps(layout: &ProjectLayout, platform: Platform) {
    let venv = layout.venv_display_name();
    let config_name = layout.display_relative(&layout.config_file);
    eprintln!();
    eprintln!("Next steps:");
    eprintln!("1. Edit {config_name} and add your OpenAI API key");
    eprintln!("2. Run the desktop application:");
    match platform {
        Platform::Windows => {
            eprintln!("   - Double-click run.bat, or");
            eprintln!("   - Run: {venv}\\Scripts\\python.exe gui.py");
        }
        Platform::Posix => {
            eprintln!("   - Run: {} && python gui.py", activate_command(platform, &venv));
        }
    }
    eprintln!();
    eprintln!("For the web interface:");
    eprintln!("   - Run: sra start");
}

#[cfg(test)]
mod tests {
    use super::*;
    use sra_core::Error;
    use sra_env::runner::RunOutcome;
    use sra_env::testing::ScriptedRunner;
    use std::fs;

    const TEMPLATE: &str = "# Copy to config.env\nAPI_KEY = \"your-openai-api-key-here\"\n";

    fn project() -> (tempfile::TempDir, ProjectLayout) {
        let tmp = tempfile::tempdir().unwrap();
        let layout = ProjectLayout::new(tmp.path());
        fs::write(&layout.manifest, "flask\nopenai\n").unwrap();
        fs::write(&layout.config_template, TEMPLATE).unwrap();
        (tmp, layout)
    }

    fn python() -> Option<PathBuf> {
        Some(PathBuf::from("python3"))
    }

    #[test]
    fn test_fresh_project_runs_every_step_in_order() {
        let (_tmp, layout) = project();
        let runner = ScriptedRunner::healthy("3.11.4");

        let summary = run_setup(&layout, Platform::Posix, &runner, python()).unwrap();
        assert_eq!(summary.environment, EnvStatus::Created);
        assert_eq!(summary.requirements, 2);
        assert_eq!(summary.config, ConfigStatus::Created);

        let calls = runner.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls[0].has_arg("--version"));
        assert!(calls[1].has_arg("venv"));
        assert!(calls[2].has_arg("--upgrade"));
        assert!(calls[3].has_arg("-r"));
        assert_eq!(fs::read_to_string(&layout.config_file).unwrap(), TEMPLATE);
    }

    #[test]
    fn test_rerun_is_idempotent_and_keeps_user_config() {
        let (_tmp, layout) = project();
        fs::create_dir_all(&layout.venv_dir).unwrap();
        fs::write(&layout.config_file, "API_KEY = \"sk-mine\"\n").unwrap();
        let runner = ScriptedRunner::healthy("3.12.1");

        let summary = run_setup(&layout, Platform::Posix, &runner, python()).unwrap();
        assert_eq!(summary.environment, EnvStatus::AlreadyPresent);
        assert_eq!(summary.config, ConfigStatus::AlreadyPresent);
        assert_eq!(runner.count_with_arg("venv"), 0);
        assert_eq!(
            fs::read_to_string(&layout.config_file).unwrap(),
            "API_KEY = \"sk-mine\"\n"
        );
    }

    #[test]
    fn test_old_interpreter_aborts_before_environment_creation() {
        let (_tmp, layout) = project();
        let runner = ScriptedRunner::healthy("3.7.17");

        let err = run_setup(&layout, Platform::Posix, &runner, python()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedRuntime { .. }));
        assert_eq!(runner.calls().len(), 1);
        assert!(!layout.venv_dir.exists());
        assert!(!layout.config_file.exists());
    }

    #[test]
    fn test_pip_upgrade_failure_stops_remaining_steps() {
        let (_tmp, layout) = project();
        let runner = ScriptedRunner::new(|spec| {
            if spec.has_arg("--version") {
                return Ok(RunOutcome {
                    stdout: "Python 3.11.4".to_string(),
                    ..RunOutcome::ok()
                });
            }
            if spec.has_arg("--upgrade") {
                return Ok(RunOutcome::failed(1, "network unreachable"));
            }
            Ok(RunOutcome::ok())
        });

        let err = run_setup(&layout, Platform::Posix, &runner, python()).unwrap_err();
        assert!(matches!(err, Error::DependencyToolError { .. }));
        assert_eq!(runner.count_with_arg("-r"), 0);
        assert!(!layout.config_file.exists());
    }

    #[test]
    fn test_missing_template_is_not_fatal() {
        let (_tmp, layout) = project();
        fs::remove_file(&layout.config_template).unwrap();
        let runner = ScriptedRunner::healthy("3.11.4");

        let summary = run_setup(&layout, Platform::Windows, &runner, python()).unwrap();
        assert_eq!(summary.config, ConfigStatus::TemplateMissing);
        assert!(!layout.config_file.exists());
        let calls = runner.calls();
        assert_eq!(calls[2].program, layout.venv_python(Platform::Windows));
        assert_eq!(calls[3].program, layout.venv_pip(Platform::Windows));
    }

    #[test]
    fn test_install_failure_names_manifest() {
        let (_tmp, layout) = project();
        let runner = ScriptedRunner::new(|spec| {
            if spec.has_arg("--version") {
                return Ok(RunOutcome {
                    stdout: "Python 3.9.2".to_string(),
                    ..RunOutcome::ok()
                });
            }
            if spec.has_arg("-r") {
                return Ok(RunOutcome::failed(1, "ERROR: Could not find a version"));
            }
            Ok(RunOutcome::ok())
        });

        let err = run_setup(&layout, Platform::Posix, &runner, python()).unwrap_err();
        match err {
            Error::DependencyInstallError { manifest, .. } => assert_eq!(manifest, layout.manifest),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
