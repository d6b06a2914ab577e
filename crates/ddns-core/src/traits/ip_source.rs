// # IP Source Trait
//
// Defines the interface for discovering the caller's current public IP.
//
// ## Implementations
//
// - HTTP echo service: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//     let current_ip = source.current().await?;
//     println!("public IP: {}", current_ip);
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for IP source implementations
///
/// # Capabilities
///
/// - Perform a single outbound request per call
/// - Return success or failure; the run is aborted on failure
///
/// Implementations must not retry, cache between runs, or decide whether the
/// DNS record needs an update.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the caller's current public IPv4 address
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Addr)`: The current public address
    /// - `Err(Error::Transport)`: If the lookup failed for any reason
    async fn current(&self) -> Result<Ipv4Addr, crate::Error>;

    /// Name of the source (for logging)
    fn source_name(&self) -> &str;
}
