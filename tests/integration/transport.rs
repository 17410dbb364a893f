//! `HttpBroker` against the fake gateway: outcome classification.

use std::time::Duration;

use flowgate_core::config::BrokerConfig;
use flowgate_core::{
    parse_key, parse_payload, BrokerConnection, CommandOutcome, CompletionRequest, FailureKind,
};
use flowgate_ctl::HttpBroker;

use crate::*;

fn broker(address: &str) -> HttpBroker {
    HttpBroker::connect(&BrokerConfig {
        address: address.to_string(),
        request_timeout_secs: 1,
        connect_timeout_secs: 1,
    })
    .expect("valid broker address")
}

fn request(key: &str, payload: Option<&str>) -> CompletionRequest {
    CompletionRequest::build(parse_key(key).unwrap(), parse_payload(payload).unwrap())
}

#[tokio::test]
async fn test_acknowledged() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();
    gw.activate(2251799813685249);

    let outcome = broker(&gw.address())
        .complete_job(request("2251799813685249", Some(r#"{"total": 12.5}"#)))
        .await;

    assert_eq!(outcome, CommandOutcome::Acknowledged);
}

#[tokio::test]
async fn test_not_found_carries_broker_detail() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();

    let outcome = request("42", None).send(&broker(&gw.address())).await;

    assert_eq!(
        outcome,
        CommandOutcome::failed(FailureKind::NotFound, "no job found with key 42")
    );
}

#[tokio::test]
async fn test_rejected() {
    let gw = FakeGateway::start(GatewayMode::Normal).await.unwrap();
    gw.activate(8);

    let outcome = request("8", Some("\"just a string\"")).send(&broker(&gw.address())).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Rejected));
}

#[tokio::test]
async fn test_overloaded_broker_is_unavailable() {
    let gw = FakeGateway::start(GatewayMode::Overloaded).await.unwrap();
    gw.activate(8);

    let outcome = request("8", None).send(&broker(&gw.address())).await;

    assert_eq!(
        outcome,
        CommandOutcome::failed(FailureKind::Unavailable, "partition leader is changing")
    );
}

#[tokio::test]
async fn test_unreadable_success_is_not_acknowledged() {
    let gw = FakeGateway::start(GatewayMode::Garbage).await.unwrap();
    gw.activate(8);

    let outcome = request("8", None).send(&broker(&gw.address())).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Unavailable));
}

#[tokio::test]
async fn test_refused_connection_is_unavailable() {
    let outcome = request("8", None).send(&broker(&unreachable_address())).await;
    assert_eq!(outcome.failure_kind(), Some(FailureKind::Unavailable));
}

#[tokio::test]
async fn test_deadline_is_enforced() {
    let gw = FakeGateway::start(GatewayMode::Hang).await.unwrap();

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        request("8", None).send(&broker(&gw.address())),
    )
    .await
    .expect("send must not outlive the request deadline");

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Unavailable));
    assert_eq!(gw.hits(), 1);
}
