// # ddns-core
//
// Core library for the Route53 dynamic DNS reconciler.
//
// ## Architecture Overview
//
// This library provides the core functionality for one reconciliation pass:
// - **IpSource**: Trait for discovering the current public IP
// - **DnsProvider**: Trait for reading and upserting DNS records via provider APIs
// - **Reconciler**: Compares the public IP with the record and upserts on divergence
// - **DdnsConfig**: Configuration loaded once at startup
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from implementations
// 2. **One-Shot**: A pass runs to completion or aborts; scheduling is external
// 3. **Library-First**: All core functionality can be used as a library
// 4. **No Ambient State**: Components receive configuration, never read the environment

pub mod traits;
pub mod engine;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{ChangeInfo, ChangeStatus, DnsProvider, HostedZoneId, IpSource, RecordSet};
pub use engine::{ReconcileOutcome, Reconciler, needs_update};
pub use config::{AwsCredentials, DdnsConfig, RunMode};
pub use error::{Error, Result};
