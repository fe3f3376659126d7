//! Multi-step deployment workflows
//!
//! Each workflow runs a fixed sequence of manager calls. The CLI commands are
//! thin wrappers that print what these return.

use crate::bucket::BucketManager;
use crate::domain::DomainManager;
use crate::endpoint::get_endpoint;
use crate::error::Result;
use crate::traits::{Bucket, DnsBackend, StorageBackend};

/// Create (or reuse) a bucket and prepare it for website hosting
///
/// The policy is always applied before the website configuration.
pub async fn setup_bucket<S: StorageBackend>(buckets: &BucketManager<S>, bucket_name: &str) -> Result<Bucket> {
    let bucket = buckets.init_bucket(bucket_name).await?;
    buckets.set_policy(&bucket).await?;
    buckets.configure_website(&bucket).await?;
    Ok(bucket)
}

/// Point `domain` at the website bucket of the same name
///
/// Reuses an existing hosted zone when one serves the domain. Returns the URL
/// the site is reachable at once DNS has propagated.
pub async fn setup_domain<S, D>(
    buckets: &BucketManager<S>,
    domains: &DomainManager<D>,
    domain: &str,
) -> Result<String>
where
    S: StorageBackend,
    D: DnsBackend,
{
    let bucket = buckets.get_bucket(domain).await?;

    let zone = match domains.find_hosted_zone(domain).await? {
        Some(zone) => zone,
        None => domains.create_hosted_zone(domain).await?,
    };

    let region = buckets.get_region_name(&bucket).await?;
    let endpoint = get_endpoint(&region)?;
    domains.create_s3_domain_record(&zone, domain, endpoint).await?;

    Ok(format!("http://{domain}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::traits::{HostedZone, MockDnsBackend, MockStorageBackend, ZonePage};
    use mockall::Sequence;

    fn example_zone() -> HostedZone {
        HostedZone {
            id: "/hostedzone/Z1".to_string(),
            name: "example.com.".to_string(),
        }
    }

    fn site_bucket_backend() -> MockStorageBackend {
        let mut storage = MockStorageBackend::new();
        storage.expect_bucket_exists().returning(|_| Ok(true));
        storage
            .expect_bucket_location()
            .returning(|_| Ok(Some("eu-west-1".to_string())));
        storage
    }

    #[tokio::test]
    async fn test_setup_bucket_applies_policy_before_website() {
        let mut seq = Sequence::new();
        let mut storage = MockStorageBackend::new();
        storage
            .expect_create_bucket()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        storage
            .expect_put_bucket_policy()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        storage
            .expect_put_bucket_website()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let manager = BucketManager::new(storage, "us-east-1");
        let bucket = setup_bucket(&manager, "example.com").await.unwrap();
        assert_eq!(bucket.name, "example.com");
    }

    #[tokio::test]
    async fn test_setup_bucket_existing_bucket_still_configured() {
        let mut storage = MockStorageBackend::new();
        storage
            .expect_create_bucket()
            .returning(|name, _| Err(Error::BucketAlreadyOwned(name.to_string())));
        storage.expect_put_bucket_policy().times(1).returning(|_, _| Ok(()));
        storage
            .expect_put_bucket_website()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let manager = BucketManager::new(storage, "us-east-1");
        setup_bucket(&manager, "example.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_setup_bucket_stops_when_policy_fails() {
        let mut storage = MockStorageBackend::new();
        storage.expect_create_bucket().returning(|_, _| Ok(()));
        storage
            .expect_put_bucket_policy()
            .returning(|_, _| Err(Error::Auth("AccessDenied".into())));
        storage.expect_put_bucket_website().never();

        let manager = BucketManager::new(storage, "us-east-1");
        let err = setup_bucket(&manager, "example.com").await.unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }

    #[tokio::test]
    async fn test_setup_domain_creates_zone_when_missing() {
        let mut seq = Sequence::new();
        let mut dns = MockDnsBackend::new();
        dns.expect_list_hosted_zones()
            .returning(|_| Ok(ZonePage::default()));
        dns.expect_create_hosted_zone()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(example_zone()));
        dns.expect_upsert_alias_record()
            .withf(|zone_id, record| {
                zone_id == "/hostedzone/Z1"
                    && record.target_host == "s3-website-eu-west-1.amazonaws.com"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let buckets = BucketManager::new(site_bucket_backend(), "eu-west-1");
        let domains = DomainManager::new(dns);
        let url = setup_domain(&buckets, &domains, "example.com").await.unwrap();
        assert_eq!(url, "http://example.com");
    }

    #[tokio::test]
    async fn test_setup_domain_reuses_existing_zone() {
        let mut dns = MockDnsBackend::new();
        dns.expect_list_hosted_zones().returning(|_| {
            Ok(ZonePage {
                zones: vec![example_zone()],
                next_marker: None,
            })
        });
        dns.expect_create_hosted_zone().never();
        dns.expect_upsert_alias_record()
            .times(1)
            .returning(|_, _| Ok(()));

        let buckets = BucketManager::new(site_bucket_backend(), "eu-west-1");
        let domains = DomainManager::new(dns);
        setup_domain(&buckets, &domains, "example.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_setup_domain_requires_bucket() {
        let mut storage = MockStorageBackend::new();
        storage.expect_bucket_exists().returning(|_| Ok(false));
        // No DNS expectations: nothing may be touched.
        let dns = MockDnsBackend::new();

        let buckets = BucketManager::new(storage, "eu-west-1");
        let domains = DomainManager::new(dns);
        let err = setup_domain(&buckets, &domains, "example.com").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
