//! Route 53 DNS backend

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_route53::types::{
    AliasTarget, Change, ChangeAction, ChangeBatch, ResourceRecordSet, RrType,
};
use sitedeploy_core::{AliasRecord, DnsBackend, Error, HostedZone, Result, ZonePage};

use crate::error::{build_error, classify};

const CHANGE_COMMENT: &str = "Created by sitedeploy";

/// Route 53 client wrapper
#[derive(Debug, Clone)]
pub struct Route53Dns {
    inner: aws_sdk_route53::Client,
}

impl Route53Dns {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            inner: aws_sdk_route53::Client::new(config),
        }
    }
}

fn hosted_zone(zone: &aws_sdk_route53::types::HostedZone) -> HostedZone {
    HostedZone {
        id: zone.id().to_string(),
        name: zone.name().to_string(),
    }
}

/// Build the UPSERT change batch for an alias record
fn alias_change_batch(record: &AliasRecord) -> Result<ChangeBatch> {
    let target = AliasTarget::builder()
        .hosted_zone_id(&record.target_zone_id)
        .dns_name(&record.target_host)
        .evaluate_target_health(false)
        .build()
        .map_err(build_error)?;

    let record_set = ResourceRecordSet::builder()
        .name(&record.name)
        .r#type(RrType::A)
        .alias_target(target)
        .build()
        .map_err(build_error)?;

    let change = Change::builder()
        .action(ChangeAction::Upsert)
        .resource_record_set(record_set)
        .build()
        .map_err(build_error)?;

    ChangeBatch::builder()
        .comment(CHANGE_COMMENT)
        .changes(change)
        .build()
        .map_err(build_error)
}

#[async_trait]
impl DnsBackend for Route53Dns {
    async fn list_hosted_zones(&self, marker: Option<String>) -> Result<ZonePage> {
        tracing::debug!(?marker, "ListHostedZones");
        let response = self
            .inner
            .list_hosted_zones()
            .set_marker(marker)
            .send()
            .await
            .map_err(classify)?;

        let zones = response.hosted_zones().iter().map(hosted_zone).collect();
        let next_marker = if response.is_truncated() {
            response.next_marker().map(|m| m.to_string())
        } else {
            None
        };

        Ok(ZonePage { zones, next_marker })
    }

    async fn create_hosted_zone(&self, name: &str, caller_reference: &str) -> Result<HostedZone> {
        tracing::debug!(name, caller_reference, "CreateHostedZone");
        let response = self
            .inner
            .create_hosted_zone()
            .name(name)
            .caller_reference(caller_reference)
            .send()
            .await
            .map_err(classify)?;

        response
            .hosted_zone()
            .map(hosted_zone)
            .ok_or_else(|| Error::Provider(format!("CreateHostedZone returned no zone for {name}")))
    }

    async fn upsert_alias_record(&self, zone_id: &str, record: &AliasRecord) -> Result<()> {
        tracing::debug!(zone_id, name = %record.name, "ChangeResourceRecordSets");
        self.inner
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(alias_change_batch(record)?)
            .send()
            .await
            .map_err(classify)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_change_batch() {
        let record = AliasRecord {
            name: "example.com".to_string(),
            target_host: "s3-website-us-east-1.amazonaws.com".to_string(),
            target_zone_id: "Z3AQBSTGFYJSTF".to_string(),
        };

        let batch = alias_change_batch(&record).unwrap();
        assert_eq!(batch.comment(), Some(CHANGE_COMMENT));
        assert_eq!(batch.changes().len(), 1);

        let rendered = format!("{batch:?}");
        assert!(rendered.contains("Upsert"));
        assert!(rendered.contains("example.com"));
        assert!(rendered.contains("s3-website-us-east-1.amazonaws.com"));
        assert!(rendered.contains("Z3AQBSTGFYJSTF"));
    }
}
