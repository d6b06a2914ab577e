// # Route53 DNS Provider
//
// This crate provides the AWS Route53 implementation of `DnsProvider`.
//
// ## Scope
//
// - Zone lookup by name: `GET /2013-04-01/hostedzonesbyname?dnsname=...`
// - Record read: `GET /2013-04-01/hostedzone/{id}/rrset?name=...&type=...&maxitems=1`
// - Record upsert: `POST /2013-04-01/hostedzone/{id}/rrset` (single UPSERT change)
//
// Every request is signed with AWS Signature Version 4. One HTTP request per
// operation; no retry, no backoff, no caching. Failures go straight back to
// the reconciler, which aborts the run.
//
// ## Security Requirements
//
// - Secret key and session token NEVER appear in logs or Debug output
// - Credentials are passed in by the caller, never read from the environment
//
// ## Required IAM permissions
//
// - route53:ListHostedZonesByName
// - route53:ListResourceRecordSets
// - route53:ChangeResourceRecordSets

mod model;
pub mod signing;

use async_trait::async_trait;
use ddns_core::config::AwsCredentials;
use ddns_core::traits::{
    ChangeInfo, ChangeStatus, DnsProvider, HostedZoneId, RecordSet, record_matches,
};
use ddns_core::{Error, Result};
use reqwest::{Method, StatusCode, Url};

use model::{
    Change, ChangeBatch, ChangeResourceRecordSet, ChangeResourceRecordSetsRequest,
    ChangeResourceRecordSetsResponse, Changes, ErrorResponse, ListHostedZonesByNameResponse,
    ListResourceRecordSetsResponse, ROUTE53_XMLNS, ResourceRecord, ResourceRecords,
};
use signing::{SignableRequest, canonical_query, sign_request};

const PROVIDER: &str = "route53";
const API_VERSION: &str = "2013-04-01";
const SERVICE: &str = "route53";

/// Route53 endpoint for the standard AWS partition
pub const ROUTE53_ENDPOINT: &str = "https://route53.amazonaws.com";
const ROUTE53_ENDPOINT_CN: &str = "https://route53.amazonaws.com.cn";
const ROUTE53_ENDPOINT_GOV: &str = "https://route53.us-gov.amazonaws.com";

/// Route53 is global: resolve the endpoint and signing region for a partition
///
/// Returns `(endpoint, signing_region)`.
pub fn partition_endpoint(region: &str) -> (&'static str, &'static str) {
    if region.starts_with("cn-") {
        (ROUTE53_ENDPOINT_CN, "cn-northwest-1")
    } else if region.starts_with("us-gov-") {
        (ROUTE53_ENDPOINT_GOV, "us-gov-west-1")
    } else {
        (ROUTE53_ENDPOINT, "us-east-1")
    }
}

/// AWS Route53 DNS provider
pub struct Route53Provider {
    /// AWS credentials
    /// ⚠️ NEVER log the secret key or session token
    credentials: AwsCredentials,

    /// API endpoint (scheme + host [+ port])
    endpoint: Url,

    /// Region used in the SigV4 credential scope
    signing_region: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the credentials
impl std::fmt::Debug for Route53Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route53Provider")
            .field("credentials", &self.credentials)
            .field("endpoint", &self.endpoint.as_str())
            .field("signing_region", &self.signing_region)
            .finish()
    }
}

impl Route53Provider {
    /// Create a provider for the partition that `region` belongs to
    pub fn new(credentials: AwsCredentials, region: &str) -> Result<Self> {
        let (endpoint, signing_region) = partition_endpoint(region);
        Self::with_endpoint(credentials, endpoint, signing_region)
    }

    /// Create a provider against an explicit endpoint
    ///
    /// Used for alternative partitions, local emulators, and tests.
    pub fn with_endpoint(
        credentials: AwsCredentials,
        endpoint: &str,
        signing_region: impl Into<String>,
    ) -> Result<Self> {
        if credentials.access_key_id.is_empty() || credentials.secret_access_key.is_empty() {
            return Err(Error::config("Route53 credentials cannot be empty"));
        }

        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::config(format!("Invalid Route53 endpoint '{}': {}", endpoint, e)))?;
        if endpoint.host_str().is_none() {
            return Err(Error::config(format!(
                "Route53 endpoint has no host: {}",
                endpoint
            )));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::provider(PROVIDER, format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            credentials,
            endpoint,
            signing_region: signing_region.into(),
            client,
        })
    }

    /// Host header value: host plus port when the port is not the scheme default
    fn host_header(&self) -> String {
        let host = self.endpoint.host_str().unwrap_or_default();
        match self.endpoint.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Make a signed request to the Route53 API and return the response body
    async fn api_request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<String> {
        let payload = body.unwrap_or_default();
        let host = self.host_header();

        let signed = sign_request(
            &SignableRequest {
                method: method.as_str(),
                host: &host,
                path,
                query,
                payload: payload.as_bytes(),
            },
            &self.credentials,
            &self.signing_region,
            SERVICE,
            chrono::Utc::now(),
        )?;

        let query_string = canonical_query(query);
        let mut url = format!(
            "{}{}",
            self.endpoint.as_str().trim_end_matches('/'),
            path
        );
        if !query_string.is_empty() {
            url.push('?');
            url.push_str(&query_string);
        }

        tracing::debug!("Route53 API request: {} {}", method, path);

        let mut request = self
            .client
            .request(method, &url)
            .header("x-amz-date", &signed.amz_date)
            .header("authorization", &signed.authorization);

        if let Some(token) = &signed.security_token {
            request = request.header("x-amz-security-token", token);
        }

        if !payload.is_empty() {
            request = request
                .header("content-type", "application/xml")
                .body(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(api_error(status, &response_body));
        }

        Ok(response_body)
    }
}

/// Map a non-success Route53 response to an error
fn api_error(status: StatusCode, body: &str) -> Error {
    let detail = quick_xml::de::from_str::<ErrorResponse>(body)
        .ok()
        .map(|r| r.error);

    let (code, message) = match &detail {
        Some(d) => (d.code.as_str(), d.message.as_str()),
        None => ("", body),
    };

    match (status.as_u16(), code) {
        (401 | 403, _) | (_, "InvalidClientTokenId" | "SignatureDoesNotMatch" | "AccessDenied") => {
            Error::auth(format!(
                "Invalid credentials or insufficient permissions. Status: {} {} {}",
                status, code, message
            ))
        }
        (429, _) | (_, "Throttling" | "PriorRequestNotComplete") => Error::rate_limited(format!(
            "Route53 throttled the request. Status: {} {} {}",
            status, code, message
        )),
        _ if code.is_empty() => Error::provider(
            PROVIDER,
            format!("API returned status {}: {}", status, message),
        ),
        _ => Error::provider(
            PROVIDER,
            format!("API returned status {} ({}): {}", status, code, message),
        ),
    }
}

fn parse_xml<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    quick_xml::de::from_str(body)
        .map_err(|e| Error::provider(PROVIDER, format!("Failed to parse response: {}", e)))
}

fn parse_change_status(status: &str) -> Result<ChangeStatus> {
    match status {
        "PENDING" => Ok(ChangeStatus::Pending),
        "INSYNC" => Ok(ChangeStatus::Insync),
        other => Err(Error::provider(
            PROVIDER,
            format!("Unknown change status: {}", other),
        )),
    }
}

#[async_trait]
impl DnsProvider for Route53Provider {
    async fn resolve_zone(&self, domain_name: &str) -> Result<HostedZoneId> {
        tracing::debug!("Looking up hosted zone for: {}", domain_name);

        let path = format!("/{}/hostedzonesbyname", API_VERSION);
        let body = self
            .api_request(Method::GET, &path, &[("dnsname", domain_name)], None)
            .await?;

        let parsed: ListHostedZonesByNameResponse = parse_xml(&body)?;

        // First listed zone wins; the listing starts at the requested name
        let zone = parsed
            .hosted_zones
            .hosted_zone
            .into_iter()
            .next()
            .ok_or_else(|| Error::zone_not_found(domain_name))?;

        tracing::debug!("Found hosted zone {} ({})", zone.id, zone.name);
        Ok(HostedZoneId::new(
            zone.id.trim_start_matches("/hostedzone/"),
        ))
    }

    async fn current_record(
        &self,
        zone: &HostedZoneId,
        domain_name: &str,
        record_type: &str,
    ) -> Result<Option<String>> {
        tracing::debug!(
            "Looking up record: {} (type: {}) in zone {}",
            domain_name,
            record_type,
            zone
        );

        let path = format!("/{}/hostedzone/{}/rrset", API_VERSION, zone.as_str());
        let body = self
            .api_request(
                Method::GET,
                &path,
                &[
                    ("name", domain_name),
                    ("type", record_type),
                    ("maxitems", "1"),
                ],
                None,
            )
            .await?;

        let parsed: ListResourceRecordSetsResponse = parse_xml(&body)?;

        let Some(set) = parsed
            .resource_record_sets
            .resource_record_set
            .iter()
            .find(|s| record_matches(&s.name, &s.record_type, domain_name, record_type))
        else {
            tracing::debug!("No record set matches {} ({})", domain_name, record_type);
            return Ok(None);
        };

        match set.first_value() {
            Some(value) => Ok(Some(value.to_string())),
            None => Err(Error::provider(
                PROVIDER,
                format!(
                    "Record set {} ({}) has no values (alias record?)",
                    set.name, set.record_type
                ),
            )),
        }
    }

    async fn upsert_record(&self, zone: &HostedZoneId, record: &RecordSet) -> Result<ChangeInfo> {
        tracing::debug!(
            "Upserting {} {} (ttl {}) -> {:?}",
            record.name,
            record.record_type,
            record.ttl,
            record.values
        );

        let request = ChangeResourceRecordSetsRequest {
            xmlns: ROUTE53_XMLNS,
            change_batch: ChangeBatch {
                comment: None,
                changes: Changes {
                    change: vec![Change {
                        action: "UPSERT",
                        resource_record_set: ChangeResourceRecordSet {
                            name: record.name.clone(),
                            record_type: record.record_type.clone(),
                            ttl: record.ttl,
                            resource_records: ResourceRecords {
                                resource_record: record
                                    .values
                                    .iter()
                                    .map(|value| ResourceRecord {
                                        value: value.clone(),
                                    })
                                    .collect(),
                            },
                        },
                    }],
                },
            },
        };

        let xml = quick_xml::se::to_string(&request)
            .map_err(|e| Error::provider(PROVIDER, format!("Failed to serialize request: {}", e)))?;

        let path = format!("/{}/hostedzone/{}/rrset", API_VERSION, zone.as_str());
        let body = self.api_request(Method::POST, &path, &[], Some(xml)).await?;

        let parsed: ChangeResourceRecordSetsResponse = parse_xml(&body)?;
        let info = parsed.change_info;

        Ok(ChangeInfo {
            status: parse_change_status(&info.status)?,
            id: info.id,
            submitted_at: info.submitted_at,
            comment: info.comment,
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
