//! Route53 API wire types (XML, API version 2013-04-01)

use serde::{Deserialize, Serialize};

pub const ROUTE53_XMLNS: &str = "https://route53.amazonaws.com/doc/2013-04-01/";

#[derive(Debug, Deserialize)]
pub struct ListHostedZonesByNameResponse {
    #[serde(rename = "HostedZones", default)]
    pub hosted_zones: HostedZones,
}

#[derive(Debug, Default, Deserialize)]
pub struct HostedZones {
    #[serde(rename = "HostedZone", default)]
    pub hosted_zone: Vec<HostedZone>,
}

#[derive(Debug, Deserialize)]
pub struct HostedZone {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ListResourceRecordSetsResponse {
    #[serde(rename = "ResourceRecordSets", default)]
    pub resource_record_sets: ResourceRecordSets,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourceRecordSets {
    #[serde(rename = "ResourceRecordSet", default)]
    pub resource_record_set: Vec<ResourceRecordSet>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceRecordSet {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "TTL")]
    pub ttl: Option<u32>,
    /// Absent for alias records
    #[serde(rename = "ResourceRecords")]
    pub resource_records: Option<ResourceRecords>,
}

impl ResourceRecordSet {
    pub fn first_value(&self) -> Option<&str> {
        self.resource_records
            .as_ref()
            .and_then(|r| r.resource_record.first())
            .map(|r| r.value.as_str())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ResourceRecords {
    #[serde(rename = "ResourceRecord", default)]
    pub resource_record: Vec<ResourceRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceRecord {
    #[serde(rename = "Value")]
    pub value: String,
}

/// Body of `POST /2013-04-01/hostedzone/{id}/rrset`
#[derive(Debug, Serialize)]
#[serde(rename = "ChangeResourceRecordSetsRequest")]
pub struct ChangeResourceRecordSetsRequest {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    #[serde(rename = "ChangeBatch")]
    pub change_batch: ChangeBatch,
}

#[derive(Debug, Serialize)]
pub struct ChangeBatch {
    #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "Changes")]
    pub changes: Changes,
}

#[derive(Debug, Serialize)]
pub struct Changes {
    #[serde(rename = "Change")]
    pub change: Vec<Change>,
}

#[derive(Debug, Serialize)]
pub struct Change {
    #[serde(rename = "Action")]
    pub action: &'static str,
    #[serde(rename = "ResourceRecordSet")]
    pub resource_record_set: ChangeResourceRecordSet,
}

#[derive(Debug, Serialize)]
pub struct ChangeResourceRecordSet {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    #[serde(rename = "ResourceRecords")]
    pub resource_records: ResourceRecords,
}

#[derive(Debug, Deserialize)]
pub struct ChangeResourceRecordSetsResponse {
    #[serde(rename = "ChangeInfo")]
    pub change_info: ChangeInfoXml,
}

#[derive(Debug, Deserialize)]
pub struct ChangeInfoXml {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "SubmittedAt")]
    pub submitted_at: Option<String>,
    #[serde(rename = "Comment")]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "Error")]
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hosted_zones_by_name() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListHostedZonesByNameResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <HostedZones>
    <HostedZone>
      <Id>/hostedzone/Z0123456789ABC</Id>
      <Name>example.com.</Name>
      <CallerReference>ref-1</CallerReference>
      <Config><PrivateZone>false</PrivateZone></Config>
      <ResourceRecordSetCount>3</ResourceRecordSetCount>
    </HostedZone>
    <HostedZone>
      <Id>/hostedzone/Z9999999999XYZ</Id>
      <Name>example.org.</Name>
      <CallerReference>ref-2</CallerReference>
    </HostedZone>
  </HostedZones>
  <DNSName>home.example.com</DNSName>
  <IsTruncated>false</IsTruncated>
  <MaxItems>100</MaxItems>
</ListHostedZonesByNameResponse>"#;

        let parsed: ListHostedZonesByNameResponse = quick_xml::de::from_str(xml).unwrap();
        let zones = parsed.hosted_zones.hosted_zone;
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].id, "/hostedzone/Z0123456789ABC");
        assert_eq!(zones[0].name, "example.com.");
    }

    #[test]
    fn parses_empty_zone_listing() {
        let xml = r#"<ListHostedZonesByNameResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <HostedZones/>
  <IsTruncated>false</IsTruncated>
  <MaxItems>100</MaxItems>
</ListHostedZonesByNameResponse>"#;

        let parsed: ListHostedZonesByNameResponse = quick_xml::de::from_str(xml).unwrap();
        assert!(parsed.hosted_zones.hosted_zone.is_empty());
    }

    #[test]
    fn parses_alias_record_without_values() {
        let xml = r#"<ListResourceRecordSetsResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <ResourceRecordSets>
    <ResourceRecordSet>
      <Name>home.example.com.</Name>
      <Type>A</Type>
      <AliasTarget>
        <HostedZoneId>Z2FDTNDATAQYW2</HostedZoneId>
        <DNSName>d111111abcdef8.cloudfront.net.</DNSName>
        <EvaluateTargetHealth>false</EvaluateTargetHealth>
      </AliasTarget>
    </ResourceRecordSet>
  </ResourceRecordSets>
  <IsTruncated>false</IsTruncated>
  <MaxItems>1</MaxItems>
</ListResourceRecordSetsResponse>"#;

        let parsed: ListResourceRecordSetsResponse = quick_xml::de::from_str(xml).unwrap();
        let set = &parsed.resource_record_sets.resource_record_set[0];
        assert_eq!(set.record_type, "A");
        assert!(set.ttl.is_none());
        assert!(set.first_value().is_none());
    }

    #[test]
    fn serializes_upsert_batch_with_namespace() {
        let request = ChangeResourceRecordSetsRequest {
            xmlns: ROUTE53_XMLNS,
            change_batch: ChangeBatch {
                comment: None,
                changes: Changes {
                    change: vec![Change {
                        action: "UPSERT",
                        resource_record_set: ChangeResourceRecordSet {
                            name: "home.example.com".to_string(),
                            record_type: "A".to_string(),
                            ttl: 300,
                            resource_records: ResourceRecords {
                                resource_record: vec![ResourceRecord {
                                    value: "203.0.113.7".to_string(),
                                }],
                            },
                        },
                    }],
                },
            },
        };

        let xml = quick_xml::se::to_string(&request).unwrap();
        assert!(xml.starts_with(
            r#"<ChangeResourceRecordSetsRequest xmlns="https://route53.amazonaws.com/doc/2013-04-01/">"#
        ));
        assert!(xml.contains("<Action>UPSERT</Action>"));
        assert!(xml.contains("<Name>home.example.com</Name>"));
        assert!(xml.contains("<TTL>300</TTL>"));
        assert!(xml.contains(
            "<ResourceRecords><ResourceRecord><Value>203.0.113.7</Value></ResourceRecord></ResourceRecords>"
        ));
        assert!(!xml.contains("<Comment>"));
    }

    #[test]
    fn parses_error_response() {
        let xml = r#"<?xml version="1.0"?>
<ErrorResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <Error>
    <Type>Sender</Type>
    <Code>NoSuchHostedZone</Code>
    <Message>No hosted zone found with ID: Z0123456789ABC</Message>
  </Error>
  <RequestId>0f9c1a7e-0000-0000-0000-000000000000</RequestId>
</ErrorResponse>"#;

        let parsed: ErrorResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.error.code, "NoSuchHostedZone");
        assert!(parsed.error.message.contains("Z0123456789ABC"));
    }
}
