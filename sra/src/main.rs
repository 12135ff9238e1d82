mod cli;
mod observability;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};
use observability::TracingMode;
use sra_commands::{check, report, setup, start};
use sra_core::config::{load_dotenv_from_dir, PathsConfig};
use sra_core::layout::resolve_root;
use sra_core::ProjectLayout;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // .env must be applied before any config read and before threads exist.
    load_dotenv_from_dir(&resolve_root(
        cli.project_dir.as_deref(),
        &PathsConfig::from_env(),
    ));
    let layout = ProjectLayout::discover(cli.project_dir.as_deref());

    let mode = match cli.command {
        Commands::Start => TracingMode::Server,
        _ => TracingMode::Default,
    };
    observability::init_tracing(mode);
    tracing::debug!(root = %layout.root.display(), "project layout resolved");

    let outcome = match cli.command {
        Commands::Setup => setup::cmd_setup(&layout),
        Commands::Start => start::cmd_start(&layout),
        Commands::Check { json } => check::cmd_check(&layout, json),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report::failure(&err);
            ExitCode::FAILURE
        }
    }
}
