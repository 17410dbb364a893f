//! flowgate-ctl: command-line interface for the flowgate workflow broker.
//!
//! The binary is a thin wrapper over [`run`]; integration tests drive the
//! same entry point against a fake gateway.

pub mod cli;
pub mod cmd;
pub mod exit;
pub mod logging;
pub mod report;
pub mod transport;

use std::future::Future;
use std::io::Write;

pub use cli::{BrokerArgs, Cli, Command, CompleteJobArgs, CompleteTarget};
pub use exit::ExitStatus;
pub use report::Reporter;
pub use transport::{ConnectError, HttpBroker};

/// Run one command, cancelling the in-flight send on Ctrl-C.
pub async fn run(cli: Cli) -> ExitStatus {
    run_until(cli, interrupted()).await
}

/// Run one command, cancelling the in-flight send when `cancel` resolves.
pub async fn run_until<F>(cli: Cli, cancel: F) -> ExitStatus
where
    F: Future<Output = ()>,
{
    run_with(cli, cancel, &mut Reporter::stdio()).await
}

/// Like [`run_until`], printing through `reporter` instead of stdio.
pub async fn run_with<F, O, E>(cli: Cli, cancel: F, reporter: &mut Reporter<O, E>) -> ExitStatus
where
    F: Future<Output = ()>,
    O: Write,
    E: Write,
{
    match &cli.command {
        Command::Complete {
            target: CompleteTarget::Job(args),
        } => cmd::complete::cmd_complete_job(&cli.broker, args, cancel, reporter).await,
    }
}

async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler: never cancel.
        std::future::pending::<()>().await;
    }
}
