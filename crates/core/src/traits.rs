//! Backend trait definitions
//!
//! `StorageBackend` and `DnsBackend` describe the handful of provider calls the
//! deployer needs. They decouple the managers from the AWS SDK and are mocked
//! in tests.

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Handle to a bucket owned by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Globally unique bucket name
    pub name: String,
}

impl Bucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A bucket as returned by a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
}

impl BucketInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: None,
        }
    }
}

/// An object as returned by a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Human-readable size
    pub size_human: String,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo for a stored file
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: size,
            size_human: humansize::format_size(size.max(0) as u64, humansize::BINARY),
            last_modified: None,
            etag: None,
        }
    }
}

/// One page of an object listing
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    /// Objects on this page
    pub items: Vec<ObjectInfo>,

    /// Token for the next page; `None` on the last page
    pub continuation_token: Option<String>,
}

/// A DNS hosted zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZone {
    /// Provider zone id (e.g. `/hostedzone/Z123`)
    pub id: String,

    /// Fully qualified zone name with trailing dot (e.g. `example.com.`)
    pub name: String,
}

/// One page of a hosted zone listing
#[derive(Debug, Clone, Default)]
pub struct ZonePage {
    /// Zones on this page
    pub zones: Vec<HostedZone>,

    /// Marker for the next page; `None` on the last page
    pub next_marker: Option<String>,
}

/// An alias record pointing a name at another provider-hosted endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    /// Record name (the domain being configured)
    pub name: String,

    /// DNS name of the alias target
    pub target_host: String,

    /// Hosted zone id that owns the alias target
    pub target_zone_id: String,
}

/// Storage operations needed to host a static site
///
/// Implemented by the S3 adapter and mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// List all buckets owned by the account
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// List one page of objects in a bucket
    async fn list_objects(&self, bucket: &str, continuation_token: Option<String>)
        -> Result<ObjectPage>;

    /// Check if a bucket exists and is reachable
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Create a bucket in a region
    ///
    /// Must return `Error::BucketAlreadyOwned` when the caller already owns it.
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<()>;

    /// Raw location constraint of a bucket; `None` for the legacy default region
    async fn bucket_location(&self, bucket: &str) -> Result<Option<String>>;

    /// Replace the bucket policy with a JSON document
    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<()>;

    /// Enable static website hosting
    async fn put_bucket_website(
        &self,
        bucket: &str,
        index_document: &str,
        error_document: &str,
    ) -> Result<()>;

    /// Store an object, overwriting any existing one at the key
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
}

/// DNS operations needed to point a domain at a website endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsBackend: Send + Sync {
    /// List one page of hosted zones
    async fn list_hosted_zones(&self, marker: Option<String>) -> Result<ZonePage>;

    /// Create a hosted zone
    async fn create_hosted_zone(&self, name: &str, caller_reference: &str) -> Result<HostedZone>;

    /// Create or replace an alias record in a zone
    async fn upsert_alias_record(&self, zone_id: &str, record: &AliasRecord) -> Result<()>;
}
