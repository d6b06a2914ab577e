//! Core traits for the DDNS reconciler
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpSource`]: Discover the current public IP
//! - [`DnsProvider`]: Read and upsert DNS records via provider APIs

pub mod ip_source;
pub mod dns_provider;

pub use ip_source::IpSource;
pub use dns_provider::{
    ChangeInfo, ChangeStatus, DnsProvider, HostedZoneId, RecordSet, record_matches,
};
