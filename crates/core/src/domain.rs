//! Hosted zone and record management

use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::traits::{AliasRecord, DnsBackend, HostedZone};

/// Manages DNS zones and records through a DNS backend
pub struct DomainManager<D> {
    backend: D,
}

impl<D: DnsBackend> DomainManager<D> {
    pub fn new(backend: D) -> Self {
        Self { backend }
    }

    /// Find the hosted zone serving `domain`, either the domain itself or a parent
    pub async fn find_hosted_zone(&self, domain: &str) -> Result<Option<HostedZone>> {
        let mut marker = None;
        loop {
            let page = self.backend.list_hosted_zones(marker).await?;
            if let Some(zone) = page.zones.into_iter().find(|z| zone_serves(&z.name, domain)) {
                tracing::debug!(zone = %zone.name, id = %zone.id, "found hosted zone");
                return Ok(Some(zone));
            }
            match page.next_marker {
                Some(next) => marker = Some(next),
                None => return Ok(None),
            }
        }
    }

    /// Create a hosted zone for the registrable part of `domain`
    pub async fn create_hosted_zone(&self, domain: &str) -> Result<HostedZone> {
        let name = zone_name_for(domain);
        let caller_reference = uuid::Uuid::new_v4().to_string();
        let zone = self
            .backend
            .create_hosted_zone(&name, &caller_reference)
            .await?;
        tracing::info!(zone = %zone.name, id = %zone.id, "created hosted zone");
        Ok(zone)
    }

    /// Point `domain` at an S3 website endpoint with an alias record
    pub async fn create_s3_domain_record(
        &self,
        zone: &HostedZone,
        domain: &str,
        endpoint: &Endpoint,
    ) -> Result<()> {
        let record = AliasRecord {
            name: domain.to_string(),
            target_host: endpoint.host.to_string(),
            target_zone_id: endpoint.zone_id.to_string(),
        };
        self.backend.upsert_alias_record(&zone.id, &record).await?;
        tracing::info!(domain, endpoint = endpoint.host, zone = %zone.name, "upserted alias record");
        Ok(())
    }
}

/// Whether a zone named `zone_name` is authoritative for `domain`
///
/// Matches on whole labels, so `example.com.` serves `www.example.com` but
/// not `badexample.com`.
pub fn zone_serves(zone_name: &str, domain: &str) -> bool {
    let zone = zone_name.trim_end_matches('.').to_ascii_lowercase();
    let domain = domain.trim_end_matches('.').to_ascii_lowercase();
    if zone.is_empty() {
        return false;
    }
    domain == zone || domain.ends_with(&format!(".{zone}"))
}

/// Zone name for a new hosted zone: the last two labels with a trailing dot
pub fn zone_name_for(domain: &str) -> String {
    let labels: Vec<&str> = domain
        .trim_end_matches('.')
        .split('.')
        .filter(|l| !l.is_empty())
        .collect();
    let start = labels.len().saturating_sub(2);
    format!("{}.", labels[start..].join("."))
}
