mod cli;
mod config;
mod logging;
mod runner;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::{error, info};

use crate::cli::CliArgs;
use crate::config::DedupConfig;
use crate::runner::Settings;

fn main() -> ExitCode {
    // Bare invocation prints usage instead of processing ./input.json.
    if std::env::args_os().len() <= 1 {
        return match CliArgs::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    let args = CliArgs::parse();

    let config = match DedupConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // Log file location is unknown without a config; report on console only.
            if logging::init(None).is_err() {
                eprintln!("error: {e:#}");
            }
            error!(error = %format!("{e:#}"), "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let settings = Settings::resolve(&args, &config);

    let log_file = settings.log_to_file.then_some(settings.log_file.as_path());
    if let Err(e) = logging::init(log_file) {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }

    match runner::run(&settings) {
        Ok(report) => {
            info!(
                target_path = %report.target.display(),
                rules = report.summary.rules_after,
                backup = ?report.backup,
                "processing completed successfully"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "deduplication failed");
            ExitCode::from(runner::exit_code(&e))
        }
    }
}
