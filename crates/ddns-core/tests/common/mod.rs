//! Test doubles and common utilities for reconciliation contract tests
//!
//! This module provides minimal test doubles that record how the
//! reconciler drives its collaborators.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::traits::{
    ChangeInfo, ChangeStatus, DnsProvider, HostedZoneId, IpSource, RecordSet,
};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An IP source that always returns the same address
pub struct StaticIpSource {
    ip: Ipv4Addr,
    call_count: Arc<AtomicUsize>,
}

impl StaticIpSource {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            ip,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter for current() calls
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait::async_trait]
impl IpSource for StaticIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.ip)
    }

    fn source_name(&self) -> &str {
        "static"
    }
}

/// An IP source that fails like an echo service answering HTTP 500
pub struct FailingIpSource;

#[async_trait::async_trait]
impl IpSource for FailingIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        Err(Error::transport("HTTP error: 500 Internal Server Error"))
    }

    fn source_name(&self) -> &str {
        "failing"
    }
}

/// What the mock provider should answer for the zone lookup
#[derive(Clone)]
pub enum ZoneBehavior {
    Found(&'static str),
    Missing,
    Fails,
}

/// Shared view of every call a [`MockDnsProvider`] received
#[derive(Clone, Default)]
pub struct ProviderCalls {
    resolve_calls: Arc<AtomicUsize>,
    read_calls: Arc<AtomicUsize>,
    upserts: Arc<Mutex<Vec<(HostedZoneId, RecordSet)>>>,
}

impl ProviderCalls {
    pub fn resolve_count(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn read_count(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    /// Total provider calls of any kind
    pub fn total(&self) -> usize {
        self.resolve_count() + self.read_count() + self.upserts().len()
    }

    pub fn upserts(&self) -> Vec<(HostedZoneId, RecordSet)> {
        self.upserts.lock().unwrap().clone()
    }
}

/// A mock DnsProvider with a canned zone and record value
pub struct MockDnsProvider {
    zone: ZoneBehavior,
    current_value: Option<String>,
    fail_upsert: bool,
    calls: ProviderCalls,
}

impl MockDnsProvider {
    pub fn new(current_value: Option<&str>) -> Self {
        Self {
            zone: ZoneBehavior::Found("Z0123456789ABC"),
            current_value: current_value.map(str::to_string),
            fail_upsert: false,
            calls: ProviderCalls::default(),
        }
    }

    pub fn with_zone(mut self, zone: ZoneBehavior) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_failing_upsert(mut self) -> Self {
        self.fail_upsert = true;
        self
    }

    /// Handle that stays valid after the provider is boxed into the reconciler
    pub fn calls(&self) -> ProviderCalls {
        self.calls.clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn resolve_zone(&self, domain_name: &str) -> Result<HostedZoneId> {
        self.calls.resolve_calls.fetch_add(1, Ordering::SeqCst);
        match &self.zone {
            ZoneBehavior::Found(id) => Ok(HostedZoneId::new(*id)),
            ZoneBehavior::Missing => Err(Error::zone_not_found(domain_name)),
            ZoneBehavior::Fails => Err(Error::auth("InvalidClientTokenId")),
        }
    }

    async fn current_record(
        &self,
        _zone: &HostedZoneId,
        _domain_name: &str,
        _record_type: &str,
    ) -> Result<Option<String>> {
        self.calls.read_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.current_value.clone())
    }

    async fn upsert_record(&self, zone: &HostedZoneId, record: &RecordSet) -> Result<ChangeInfo> {
        self.calls
            .upserts
            .lock()
            .unwrap()
            .push((zone.clone(), record.clone()));

        if self.fail_upsert {
            return Err(Error::provider("mock", "InvalidChangeBatch"));
        }

        Ok(ChangeInfo {
            id: "/change/C2682N5HXP0BZ4".to_string(),
            status: ChangeStatus::Pending,
            submitted_at: Some("2026-10-19T12:00:00.000Z".to_string()),
            comment: None,
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Helper to create the configuration used by the reconciliation scenarios
pub fn scenario_config() -> ddns_core::config::DdnsConfig {
    ddns_core::config::DdnsConfig {
        credentials: ddns_core::config::AwsCredentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: None,
        },
        region: "us-east-1".to_string(),
        domain_name: "home.example.com".to_string(),
        record_type: "A".to_string(),
        ttl: 300,
        schedule: "*/5 * * * *".to_string(),
        ip_echo_url: ddns_core::config::DEFAULT_IP_ECHO_URL.to_string(),
        log_level: "info".to_string(),
        mode: ddns_core::config::RunMode::Live,
    }
}

pub fn public_ip() -> Ipv4Addr {
    Ipv4Addr::new(203, 0, 113, 7)
}
