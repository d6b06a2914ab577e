//! Core reconciliation engine
//!
//! The Reconciler is responsible for:
//! - Discovering the public IP via IpSource
//! - Resolving the hosted zone and reading the record via DnsProvider
//! - Deciding whether the record diverges from the public IP
//! - Upserting the record when it does
//!
//! ## Flow
//!
//! ```text
//! Start → IP Resolved → Zone Resolved → Current Value Read
//!       → { Update Needed → Updated | No Update Needed } → Done
//! ```
//!
//! Any error aborts the pass at the step that produced it. There is no retry:
//! the next scheduled invocation starts over from scratch.

use crate::config::DdnsConfig;
use crate::error::Result;
use crate::traits::{ChangeInfo, DnsProvider, HostedZoneId, IpSource, RecordSet};
use std::net::Ipv4Addr;
use tracing::{debug, info};

/// Result of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The record diverged and was upserted
    Updated {
        /// Value read before the upsert (`None` if the record did not exist)
        previous: Option<String>,
        /// The record set that was written
        record: RecordSet,
        /// Provider confirmation
        change: ChangeInfo,
    },

    /// The record already holds the public IP
    Unchanged {
        /// The current value
        current: String,
    },

    /// The record diverged but the run is in dry-run mode
    DryRun {
        /// Value read from the provider
        previous: Option<String>,
        /// The record set that would have been written
        record: RecordSet,
    },
}

impl ReconcileOutcome {
    /// Whether an upsert was issued
    pub fn is_updated(&self) -> bool {
        matches!(self, ReconcileOutcome::Updated { .. })
    }
}

/// Update policy: exact string inequality, absent record always diverges
pub fn needs_update(resolved_ip: &str, current: Option<&str>) -> bool {
    current != Some(resolved_ip)
}

/// One-shot reconciler
///
/// Holds the configuration and both collaborators for a single run.
/// Everything is sequential; nothing is spawned.
pub struct Reconciler {
    /// IP source for discovering the public address
    ip_source: Box<dyn IpSource>,

    /// DNS provider for reading and writing the record
    provider: Box<dyn DnsProvider>,

    /// Run configuration
    config: DdnsConfig,
}

impl Reconciler {
    /// Create a new reconciler
    ///
    /// Validates the configuration before any collaborator is used.
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        config: DdnsConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            provider,
            config,
        })
    }

    /// Run one reconciliation pass
    ///
    /// # Returns
    ///
    /// - `Ok(ReconcileOutcome)`: The pass completed
    /// - `Err(Error)`: The pass aborted at the failing step
    pub async fn run(&self) -> Result<ReconcileOutcome> {
        debug!(
            "Reconciling {} ({}) via {} and {}",
            self.config.domain_name,
            self.config.record_type,
            self.ip_source.source_name(),
            self.provider.provider_name()
        );

        let public_ip = self.resolve_public_ip().await?;
        let zone = self.resolve_zone().await?;
        let current = self.read_current_value(&zone).await?;

        let resolved = public_ip.to_string();
        if !needs_update(&resolved, current.as_deref()) {
            info!("IP has not changed. No update needed.");
            return Ok(ReconcileOutcome::Unchanged { current: resolved });
        }

        info!("IP has changed. Updating DNS record.");
        let record = self.desired_record(&resolved);

        if self.config.is_dry_run() {
            info!(
                "[DRY-RUN] Would upsert {} {} (ttl {}) -> {}",
                record.name, record.record_type, record.ttl, resolved
            );
            return Ok(ReconcileOutcome::DryRun {
                previous: current,
                record,
            });
        }

        let change = self.provider.upsert_record(&zone, &record).await?;
        info!("DNS update response: {:?}", change);

        Ok(ReconcileOutcome::Updated {
            previous: current,
            record,
            change,
        })
    }

    async fn resolve_public_ip(&self) -> Result<Ipv4Addr> {
        let ip = self.ip_source.current().await?;
        info!("Public IP: {}", ip);
        Ok(ip)
    }

    async fn resolve_zone(&self) -> Result<HostedZoneId> {
        let zone = self.provider.resolve_zone(&self.config.domain_name).await?;
        info!("Hosted zone ID: {}", zone);
        Ok(zone)
    }

    async fn read_current_value(&self, zone: &HostedZoneId) -> Result<Option<String>> {
        let current = self
            .provider
            .current_record(zone, &self.config.domain_name, &self.config.record_type)
            .await?;

        match &current {
            Some(value) => info!("Current DNS IP: {}", value),
            None => info!("Current DNS IP: none (record not found)"),
        }

        Ok(current)
    }

    /// Record set for the resolved IP; name, type and TTL come from configuration
    fn desired_record(&self, resolved_ip: &str) -> RecordSet {
        RecordSet::single(
            self.config.domain_name.clone(),
            self.config.record_type.clone(),
            self.config.ttl,
            resolved_ip,
        )
    }
}
