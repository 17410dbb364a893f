//! flowgate-ctl: command-line interface for the flowgate workflow broker.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use flowgate_ctl::{Cli, ExitStatus};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors are configuration errors; --help and --version are not.
            let status = if e.use_stderr() {
                ExitStatus::ConfigurationError
            } else {
                ExitStatus::Success
            };
            let _ = e.print();
            return status.into();
        }
    };

    flowgate_ctl::logging::init(cli.verbose);

    match execute(cli) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitStatus::GeneralError.into()
        }
    }
}

/// One command per process, on a single-threaded runtime.
fn execute(cli: Cli) -> Result<ExitStatus> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok(runtime.block_on(flowgate_ctl::run(cli)))
}
