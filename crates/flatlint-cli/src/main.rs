//! flatlint CLI tool.
//!
//! Usage:
//! ```bash
//! flatlint check [OPTIONS] [TARGET]
//! flatlint list-rules
//! flatlint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Flat-config linter: ordered configuration fragments, one evaluation plan
#[derive(Parser)]
#[command(name = "flatlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// Directory to lint, or a glob pattern selecting files
        #[arg(default_value = ".")]
        target: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Severity threshold for a failing exit status
        #[arg(long)]
        fail_on: Option<FailOn>,

        /// Extra ignore patterns, applied globally (can be repeated)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize a configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

/// Failing-severity threshold accepted on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FailOn {
    /// Fail on warnings or errors.
    Warn,
    /// Fail only on errors.
    Error,
}

impl From<FailOn> for flatlint_core::Severity {
    fn from(value: FailOn) -> Self {
        match value {
            FailOn::Warn => Self::Warn,
            FailOn::Error => Self::Error,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            target,
            format,
            fail_on,
            exclude,
        } => commands::check::run(
            &target,
            format,
            fail_on.map(Into::into),
            exclude,
            cli.config.as_deref(),
        ),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
