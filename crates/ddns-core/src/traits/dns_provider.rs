// # DNS Provider Trait
//
// Defines the interface to a managed DNS provider's control plane.
//
// ## Implementations
//
// - Route53: `ddns-provider-route53` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{DnsProvider, RecordSet};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let zone = provider.resolve_zone("home.example.com").await?;
//     let current = provider
//         .current_record(&zone, "home.example.com", "A")
//         .await?;
//
//     if current.as_deref() != Some("203.0.113.7") {
//         let record = RecordSet::single("home.example.com", "A", 300, "203.0.113.7");
//         provider.upsert_record(&zone, &record).await?;
//     }
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Provider-side identifier of a hosted zone
///
/// Opaque; only used to scope record operations within one run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostedZoneId(String);

impl HostedZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HostedZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, typed DNS entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Record name (e.g., "home.example.com")
    pub name: String,
    /// Record type (e.g., "A")
    pub record_type: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Record values
    pub values: Vec<String>,
}

impl RecordSet {
    /// Create a record set holding exactly one value
    pub fn single(
        name: impl Into<String>,
        record_type: impl Into<String>,
        ttl: u32,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            ttl,
            values: vec![value.into()],
        }
    }
}

/// Status of a submitted change batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeStatus {
    /// Accepted, not yet propagated to all authoritative servers
    Pending,
    /// Propagated
    Insync,
}

/// Provider confirmation of an upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeInfo {
    /// Change id (provider-specific)
    pub id: String,
    /// Change status
    pub status: ChangeStatus,
    /// Submission timestamp as reported by the provider
    pub submitted_at: Option<String>,
    /// Comment echoed back by the provider
    pub comment: Option<String>,
}

/// Trait for DNS provider implementations
///
/// Implementations must handle the specifics of each provider's API.
///
/// # Capabilities
///
/// - Perform HTTP/HTTPS API calls to their endpoints only
/// - Parse provider-specific responses
/// - Return success or failure; every failure aborts the run
///
/// Providers must not retry, back off, cache, or decide whether an update is
/// needed (owned by `Reconciler`).
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Look up the hosted zone for a domain
    ///
    /// Takes the first zone the provider lists for the name, without checking
    /// that it is an exact match.
    ///
    /// # Returns
    ///
    /// - `Ok(HostedZoneId)`: The first listed zone
    /// - `Err(Error::ZoneNotFound)`: The provider listed no zone
    /// - `Err(Error)`: The request failed
    async fn resolve_zone(&self, domain_name: &str) -> Result<HostedZoneId, crate::Error>;

    /// Read the current value of a record
    ///
    /// Matches the first record set whose name starts with `domain_name` and
    /// whose type equals `record_type`, returning its first value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: The record's first value
    /// - `Ok(None)`: No matching record exists
    /// - `Err(Error)`: The request failed, or the match carries no value
    async fn current_record(
        &self,
        zone: &HostedZoneId,
        domain_name: &str,
        record_type: &str,
    ) -> Result<Option<String>, crate::Error>;

    /// Create or update a record set (idempotent)
    ///
    /// # Returns
    ///
    /// - `Ok(ChangeInfo)`: The provider's change confirmation
    /// - `Err(Error)`: The request failed
    async fn upsert_record(
        &self,
        zone: &HostedZoneId,
        record: &RecordSet,
    ) -> Result<ChangeInfo, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Match rule for record lookups
///
/// Providers list record sets starting at a name, so the listing may return
/// the lexically next record. Names are compared by prefix (a provider may add
/// a trailing dot), types exactly.
pub fn record_matches(
    listed_name: &str,
    listed_type: &str,
    domain_name: &str,
    record_type: &str,
) -> bool {
    listed_name.starts_with(domain_name) && listed_type == record_type
}
