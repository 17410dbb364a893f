//! `complete job`: mark a leased job finished and hand its payload back
//! to the workflow instance.

use std::future::Future;
use std::io::Write;

use flowgate_core::{
    parse_key, parse_payload, BrokerConnection, CommandOutcome, CompletionRequest, FailureKind,
};

use crate::cli::{BrokerArgs, CompleteJobArgs};
use crate::exit::ExitStatus;
use crate::report::{InputError, Reporter};
use crate::transport::HttpBroker;

/// Validate the arguments into a request. Runs before any connection exists.
pub fn prepare(args: &CompleteJobArgs) -> Result<CompletionRequest, InputError> {
    let key = parse_key(&args.job_key)?;
    let payload = parse_payload(args.payload.as_deref())?;
    Ok(CompletionRequest::build(key, payload))
}

/// Send `request`, giving up with `Unavailable` if `cancel` resolves first.
pub async fn send_until<C, F>(conn: &C, request: CompletionRequest, cancel: F) -> CommandOutcome
where
    C: BrokerConnection,
    F: Future<Output = ()>,
{
    let key = request.key();
    tokio::select! {
        outcome = request.send(conn) => outcome,
        () = cancel => {
            tracing::warn!(job_key = %key, "completion cancelled before the broker replied");
            CommandOutcome::failed(FailureKind::Unavailable, "cancelled before the broker replied")
        }
    }
}

async fn send_and_report<C, F, O, E>(
    conn: &C,
    request: CompletionRequest,
    cancel: F,
    reporter: &mut Reporter<O, E>,
) -> ExitStatus
where
    C: BrokerConnection,
    F: Future<Output = ()>,
    O: Write,
    E: Write,
{
    let key = request.key();
    let raw_payload = request.payload().raw().to_string();

    let outcome = send_until(conn, request, cancel).await;
    reporter.report(&outcome, key, &raw_payload)
}

/// Validate, send and report over an existing connection.
pub async fn cmd_complete_job_with<C, F, O, E>(
    conn: &C,
    args: &CompleteJobArgs,
    cancel: F,
    reporter: &mut Reporter<O, E>,
) -> ExitStatus
where
    C: BrokerConnection,
    F: Future<Output = ()>,
    O: Write,
    E: Write,
{
    match prepare(args) {
        Ok(request) => send_and_report(conn, request, cancel, reporter).await,
        Err(e) => reporter.input_error(&e),
    }
}

/// Entry point used by the binary: validate, resolve the broker, connect,
/// send, report. Bad input is reported before config or address problems.
pub async fn cmd_complete_job<F, O, E>(
    broker: &BrokerArgs,
    args: &CompleteJobArgs,
    cancel: F,
    reporter: &mut Reporter<O, E>,
) -> ExitStatus
where
    F: Future<Output = ()>,
    O: Write,
    E: Write,
{
    let prepared = prepare(args).and_then(|request| {
        let config = broker.resolve()?;
        let conn = HttpBroker::connect(&config)?;
        Ok((conn, request))
    });

    match prepared {
        Ok((conn, request)) => send_and_report(&conn, request, cancel, reporter).await,
        Err(e) => reporter.input_error(&e),
    }
}
