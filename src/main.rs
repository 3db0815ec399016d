mod cli;

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

const LOG_FILE: &str = "generation.log";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.command.resolve_config(cli.config.as_deref())?;

    let log_dir = match &cli.command {
        Commands::Generate { .. } => Some(config.output_dir.as_path()),
        _ => None,
    };
    init_tracing(cli.verbose, log_dir)?;

    match &cli.command {
        Commands::Generate { .. } => {
            let report = cli::generate(config, !cli.verbose)?;
            if report.has_errors() {
                anyhow::bail!("generation finished with {} error(s)", report.errors.len());
            }
        }
        Commands::Scan { format, .. } => {
            cli::scan_modules(config, format)?;
        }
        Commands::Parse { path, format } => {
            cli::parse_headers(path, format)?;
        }
        Commands::Deps { build_cs, format } => {
            cli::show_dependencies(build_cs, format)?;
        }
    }

    Ok(())
}

/// Console logging on stderr, plus an appending plain-text log file when
/// `log_dir` is given.
fn init_tracing(verbose: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let default_filter = if verbose {
        "ue_api_docs=debug"
    } else {
        "ue_api_docs=info"
    };

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}
