//! Contract Test: Abort Semantics
//!
//! Constraints verified:
//! - A failed IP lookup aborts before any provider call
//! - A missing hosted zone surfaces as an explicit ZoneNotFound error
//! - Provider failures propagate unchanged, with no retry
//!
//! If this test fails, a failing step no longer stops the pass.

mod common;

use common::*;
use ddns_core::{Error, Reconciler};
use std::sync::atomic::Ordering;

#[tokio::test]
async fn ip_lookup_failure_aborts_before_provider_calls() {
    // Scenario D: echo endpoint answers HTTP 500
    let provider = MockDnsProvider::new(Some("203.0.113.5"));
    let calls = provider.calls();

    let reconciler =
        Reconciler::new(Box::new(FailingIpSource), Box::new(provider), scenario_config())
            .unwrap();

    let err = reconciler.run().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "got {:?}", err);
    assert_eq!(calls.total(), 0, "No provider call may follow a failed IP lookup");
}

#[tokio::test]
async fn missing_zone_is_an_explicit_error() {
    let provider = MockDnsProvider::new(Some("203.0.113.5")).with_zone(ZoneBehavior::Missing);
    let calls = provider.calls();

    let reconciler = Reconciler::new(
        Box::new(StaticIpSource::new(public_ip())),
        Box::new(provider),
        scenario_config(),
    )
    .unwrap();

    let err = reconciler.run().await.unwrap_err();

    match err {
        Error::ZoneNotFound(domain) => assert_eq!(domain, "home.example.com"),
        other => panic!("Expected ZoneNotFound, got {:?}", other),
    }
    assert_eq!(calls.read_count(), 0);
    assert!(calls.upserts().is_empty());
}

#[tokio::test]
async fn zone_lookup_failure_is_not_retried() {
    let provider = MockDnsProvider::new(None).with_zone(ZoneBehavior::Fails);
    let calls = provider.calls();

    let reconciler = Reconciler::new(
        Box::new(StaticIpSource::new(public_ip())),
        Box::new(provider),
        scenario_config(),
    )
    .unwrap();

    let err = reconciler.run().await.unwrap_err();

    assert!(matches!(err, Error::Authentication(_)), "got {:?}", err);
    assert_eq!(calls.resolve_count(), 1, "Zone lookup must run exactly once");
    assert!(calls.upserts().is_empty());
}

#[tokio::test]
async fn upsert_failure_propagates() {
    let provider = MockDnsProvider::new(Some("203.0.113.5")).with_failing_upsert();
    let calls = provider.calls();

    let ip_source = StaticIpSource::new(public_ip());
    let ip_calls = ip_source.call_counter();

    let reconciler =
        Reconciler::new(Box::new(ip_source), Box::new(provider), scenario_config()).unwrap();

    let err = reconciler.run().await.unwrap_err();

    assert!(matches!(err, Error::Provider { .. }), "got {:?}", err);
    assert_eq!(calls.upserts().len(), 1, "Exactly one attempt, no retry");
    assert_eq!(ip_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn invalid_configuration_is_rejected_at_construction() {
    let mut config = scenario_config();
    config.log_level = "loud".to_string();

    let provider = MockDnsProvider::new(None);
    let calls = provider.calls();

    let result = Reconciler::new(
        Box::new(StaticIpSource::new(public_ip())),
        Box::new(provider),
        config,
    );

    assert!(matches!(result, Err(Error::Config(_))));
    assert_eq!(calls.total(), 0);
}
