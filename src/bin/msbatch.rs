use std::env;
use std::process::ExitCode;

use msbatch::{MessageType, NullProgressMonitor, ProcessingInfo, run_job_file};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: msbatch <job-file.xml> [--strict]";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn log_result(result: &ProcessingInfo) {
    for m in result.messages() {
        match m.message_type {
            MessageType::Info => info!(source = %m.description, "{}", m.message),
            MessageType::Warn => warn!(source = %m.description, "{}", m.message),
            MessageType::Error => error!(source = %m.description, "{}", m.message),
        }
    }
}

fn main() -> ExitCode {
    init_logging();

    let mut job_path = None;
    let mut strict = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--strict" => strict = true,
            _ if job_path.is_none() => job_path = Some(arg.trim().to_string()),
            _ => {
                eprintln!("{USAGE}");
                return ExitCode::from(2);
            }
        }
    }
    let Some(job_path) = job_path else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    info!(path = %job_path, "read and execute batch process");
    let monitor = NullProgressMonitor;
    match run_job_file(&job_path, &monitor) {
        Ok(result) => {
            log_result(&result);
            if strict && result.has_error_message() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{e}");
            if let Some(source) = std::error::Error::source(&e) {
                error!("caused by: {source}");
            }
            ExitCode::FAILURE
        }
    }
}
