//! `complete job` end to end: arguments in, exit status and broker state out.

use std::time::{Duration, Instant};

use serde_json::json;

use flowgate_ctl::ExitStatus;

use crate::*;

#[tokio::test]
async fn test_complete_job_with_payload() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();
    gw.activate(512);

    let (status, out, err) = run_ctl_captured(
        &gw.address(),
        &["complete", "job", "512", "--payload", r#"{"result":"ok"}"#],
    )
    .await;

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(out, "Completed job with key 512 and payload {\"result\":\"ok\"}\n");
    assert!(err.is_empty(), "unexpected stderr: {err}");
    assert_eq!(
        gw.job(512),
        Some(JobState::Completed {
            payload: json!({"result": "ok"})
        })
    );
}

#[tokio::test]
async fn test_complete_job_default_payload() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();
    gw.activate(1);

    let status = run_ctl(&gw.address(), &["complete", "job", "1"]).await;

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(gw.job(1), Some(JobState::Completed { payload: json!({}) }));
}

#[tokio::test]
async fn test_invalid_key_is_configuration_error_without_network() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();

    for key in ["abc", "-5", "+5", "1.5", "18446744073709551616"] {
        let status = run_ctl(&gw.address(), &["complete", "job", key]).await;
        assert_eq!(status, ExitStatus::ConfigurationError, "key {key:?}");
    }
    assert_eq!(gw.hits(), 0);
}

#[tokio::test]
async fn test_invalid_payload_is_configuration_error_without_network() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();
    gw.activate(7);

    let status = run_ctl(&gw.address(), &["complete", "job", "7", "--payload", "{result: ok}"]).await;

    assert_eq!(status, ExitStatus::ConfigurationError);
    assert_eq!(gw.hits(), 0);
    assert_eq!(gw.job(7), Some(JobState::Activated));
}

#[tokio::test]
async fn test_invalid_key_prints_error_and_no_confirmation() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();

    let (status, out, err) = run_ctl_captured(&gw.address(), &["complete", "job", "abc"]).await;

    assert_eq!(status, ExitStatus::ConfigurationError);
    assert!(out.is_empty(), "unexpected stdout: {out}");
    assert!(err.contains("Expect job key as only positional argument, got 'abc'"), "{err}");
}

#[tokio::test]
async fn test_zero_request_timeout_is_configuration_error_without_network() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();
    gw.activate(5);
    let address = gw.address();
    let config = no_config();

    let (status, out, err) = run_cli_captured(&[
        "--address",
        &address,
        "--config",
        &config,
        "--request-timeout",
        "0",
        "complete",
        "job",
        "5",
    ])
    .await;

    assert_eq!(status, ExitStatus::ConfigurationError);
    assert!(out.is_empty());
    assert!(err.contains("request_timeout_secs must be at least 1 second"), "{err}");
    assert_eq!(gw.hits(), 0);
    assert_eq!(gw.job(5), Some(JobState::Activated));
}

#[tokio::test]
async fn test_unknown_job_prints_not_found_diagnostic() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();

    let (status, out, err) = run_ctl_captured(&gw.address(), &["complete", "job", "404"]).await;

    assert_eq!(status, ExitStatus::IoError);
    assert!(out.is_empty(), "success must not be printed on failure: {out}");
    assert!(err.starts_with("Failed to complete job with key 404 (not found)"), "{err}");
}

#[tokio::test]
async fn test_unknown_job_is_runtime_error() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();

    let status = run_ctl(&gw.address(), &["complete", "job", "404"]).await;

    assert_eq!(status, ExitStatus::IoError);
    assert_eq!(gw.hits(), 1);
}

#[tokio::test]
async fn test_second_completion_of_same_job_fails() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();
    gw.activate(9);

    let first = run_ctl(&gw.address(), &["complete", "job", "9", "--payload", r#"{"n":1}"#]).await;
    let second = run_ctl(&gw.address(), &["complete", "job", "9", "--payload", r#"{"n":2}"#]).await;

    assert_eq!(first, ExitStatus::Success);
    assert_eq!(second, ExitStatus::IoError);
    assert_eq!(gw.job(9), Some(JobState::Completed { payload: json!({"n": 1}) }));
}

#[tokio::test]
async fn test_broker_rejection_is_runtime_error() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();
    gw.activate(3);

    // Valid JSON, but the broker wants an object at the root.
    let status = run_ctl(&gw.address(), &["complete", "job", "3", "--payload", "[1,2,3]"]).await;

    assert_eq!(status, ExitStatus::IoError);
    assert_eq!(gw.hits(), 1);
    assert_eq!(gw.job(3), Some(JobState::Activated));
}

#[tokio::test]
async fn test_unreachable_broker_is_runtime_error() {
    let address = unreachable_address();

    let started = Instant::now();
    let status = run_ctl(&address, &["complete", "job", "5"]).await;

    assert_eq!(status, ExitStatus::IoError);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_hanging_broker_times_out() {
    let gw = FakeGateway::start(GatewayMode::Hang).await.unwrap();
    gw.activate(5);

    let started = Instant::now();
    let status = run_ctl(&gw.address(), &["complete", "job", "5"]).await;

    assert_eq!(status, ExitStatus::IoError);
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn test_bad_address_is_configuration_error() {
    let status = run_ctl("ftp://broker:21", &["complete", "job", "5"]).await;
    assert_eq!(status, ExitStatus::ConfigurationError);
}

#[tokio::test]
async fn test_cancellation_is_runtime_error() {
    let gw = FakeGateway::start(GatewayMode::Hang).await.unwrap();
    let config = no_config();
    let address = gw.address();
    let cli = parse_cli(&["--address", &address, "--config", &config, "complete", "job", "5"]);

    let cancel = tokio::time::sleep(Duration::from_millis(200));
    let status = flowgate_ctl::run_until(cli, cancel).await;

    assert_eq!(status, ExitStatus::IoError);
}
