// scene_runner/src/main.rs
mod runner;

use crate::runner::*;
use scene_core::logging::logging::{init_file_logger, init_stderr_logger};
use scene_core::storage::host_config::{get_config, HostConfig};
use flexi_logger::LoggerHandle;
use std::process::ExitCode;
use std::path::Path;
use scene_core::*;
use std::env;

const USAGE: &str = "Usage: scene-runner <entry.lua> [config.ron] [inputs.ron]";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(entry) = args.first() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    if args.len() > 3 {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    }

    let config = match args.get(1) {
        Some(path) => match HostConfig::load_from(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Could not load config {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => get_config(),
    };

    // Keep the handle alive so buffered log lines are flushed on exit.
    let _logger = init_logging(&config);

    let inputs = match args.get(2) {
        Some(path) => match load_inputs(Path::new(path)) {
            Ok(inputs) => inputs,
            Err(e) => {
                host_error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Vec::new(),
    };

    let mut runner = match Runner::new(config, inputs) {
        Ok(runner) => runner,
        Err(e) => {
            host_error!("Could not create the script runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runner.run(Path::new(entry)) {
        Ok(frames) => {
            host_info!("Finished after {frames} frames.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            host_error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &HostConfig) -> Option<LoggerHandle> {
    if config.log_to_file {
        match init_file_logger(config) {
            Ok(handle) => return Some(handle),
            Err(e) => eprintln!("File logging unavailable ({e}), logging to stderr."),
        }
    }

    match init_stderr_logger(&config.log_level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Could not start logging: {e}");
            None
        }
    }
}
