// # HTTP IP Source
//
// This crate provides the public IP resolver for the DDNS reconciler.
//
// ## Architecture
//
// Issues one GET to an external "what is my IP" service (e.g. api.ipify.org,
// ifconfig.me/ip, icanhazip.com) and parses the plain-text body as an IPv4
// address. Any failure is returned to the reconciler, which aborts the run.

use ddns_core::traits::IpSource;
use ddns_core::{Error, Result};

use std::net::Ipv4Addr;

/// HTTP-based IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch IP from
    url: String,

    /// HTTP client (transport defaults, no custom timeout)
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: URL to fetch IP from (e.g., "https://api.ipify.org")
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch current IP from HTTP service
    async fn fetch_ip(&self) -> Result<Ipv4Addr> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Request to {} failed: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(Error::transport(format!(
                "HTTP error from {}: {}",
                self.url,
                response.status()
            )));
        }

        let ip_text = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response: {}", e)))?;

        parse_ipv4(&ip_text)
    }
}

/// Parse an echo-service body as an IPv4 address
///
/// Surrounding whitespace (a trailing newline from icanhazip, for instance)
/// is ignored.
pub fn parse_ipv4(body: &str) -> Result<Ipv4Addr> {
    let ip_text = body.trim();
    ip_text
        .parse()
        .map_err(|_| Error::transport(format!("Invalid IPv4 address in response: '{}'", ip_text)))
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        tracing::debug!("Fetching public IP from {}", self.url);
        self.fetch_ip().await
    }

    fn source_name(&self) -> &str {
        "http"
    }
}
