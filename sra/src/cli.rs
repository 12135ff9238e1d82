use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Safety Report Analyzer - environment setup and launcher
#[derive(Parser, Debug)]
#[command(name = "sra")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory holding .venv, requirements.txt and config.env (default: current directory)
    #[arg(long, global = true, value_name = "DIR", env = "SRA_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check Python, create .venv, install requirements and create config.env from its template
    Setup,

    /// Verify .venv and config.env, then start the web server on 0.0.0.0:5000
    Start,

    /// Run the start preflight checks without starting the server
    Check {
        /// Print a machine-readable readiness report on stdout
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_json_with_project_dir() {
        let cli = Cli::try_parse_from(["sra", "check", "--json", "--project-dir", "/srv/app"])
            .unwrap();
        assert_eq!(cli.project_dir, Some(PathBuf::from("/srv/app")));
        assert!(matches!(cli.command, Commands::Check { json: true }));
    }

    #[test]
    fn test_setup_takes_no_arguments() {
        assert!(Cli::try_parse_from(["sra", "setup", "extra"]).is_err());
    }
}
