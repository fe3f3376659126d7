//! Bucket management
//!
//! `BucketManager` owns every bucket-level operation: listing, creation,
//! public-read policy, website hosting, uploads and directory sync.

use std::path::Path;

use futures::stream::{self, Stream, TryStreamExt};
use serde_json::json;
use url::Url;

use crate::endpoint::get_endpoint;
use crate::error::{Error, Result};
use crate::session::DEFAULT_REGION;
use crate::traits::{Bucket, BucketInfo, ObjectInfo, StorageBackend};
use crate::walk::{resolve_root, walk_files};

/// Document served for directory requests
pub const INDEX_DOCUMENT: &str = "index.html";

/// Document served for missing keys
pub const ERROR_DOCUMENT: &str = "error.html";

/// Content type used when the key's extension is unknown
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Manages buckets through a storage backend bound to one session region
pub struct BucketManager<S> {
    backend: S,
    region: String,
}

impl<S: StorageBackend> BucketManager<S> {
    /// Create a manager that creates new buckets in `region`
    pub fn new(backend: S, region: impl Into<String>) -> Self {
        Self {
            backend,
            region: region.into(),
        }
    }

    /// Lazily list every bucket owned by the account
    pub fn all_buckets(&self) -> impl Stream<Item = Result<BucketInfo>> + '_ {
        stream::once(self.backend.list_buckets())
            .map_ok(|buckets| stream::iter(buckets.into_iter().map(Ok::<_, Error>)))
            .try_flatten()
    }

    /// Lazily list every object in a bucket, fetching pages on demand
    pub fn all_objects<'a>(&'a self, bucket: &'a str) -> impl Stream<Item = Result<ObjectInfo>> + 'a {
        // Outer None: done. Inner None: first page.
        stream::try_unfold(Some(None), move |state: Option<Option<String>>| async move {
            let Some(token) = state else {
                return Ok::<_, Error>(None);
            };
            let page = self.backend.list_objects(bucket, token).await?;
            let next = page.continuation_token.map(Some);
            Ok(Some((stream::iter(page.items.into_iter().map(Ok::<_, Error>)), next)))
        })
        .try_flatten()
    }

    /// Create a bucket, or return the existing one if the caller already owns it
    pub async fn init_bucket(&self, bucket_name: &str) -> Result<Bucket> {
        match self.backend.create_bucket(bucket_name, &self.region).await {
            Ok(()) => {
                tracing::info!(bucket = bucket_name, region = %self.region, "created bucket");
            }
            Err(Error::BucketAlreadyOwned(_)) => {
                tracing::warn!(bucket = bucket_name, "bucket already exists, reusing it");
            }
            Err(e) => return Err(e),
        }
        Ok(Bucket::new(bucket_name))
    }

    /// Look up an existing bucket by name
    pub async fn get_bucket(&self, bucket_name: &str) -> Result<Bucket> {
        if self.backend.bucket_exists(bucket_name).await? {
            Ok(Bucket::new(bucket_name))
        } else {
            Err(Error::NotFound(format!("Bucket not found: {bucket_name}")))
        }
    }

    /// Make every object in the bucket publicly readable
    pub async fn set_policy(&self, bucket: &Bucket) -> Result<()> {
        let policy = public_read_policy(&bucket.name);
        tracing::debug!(bucket = %bucket.name, %policy, "putting bucket policy");
        self.backend
            .put_bucket_policy(&bucket.name, &policy)
            .await
    }

    /// Enable static website hosting with the fixed index and error documents
    pub async fn configure_website(&self, bucket: &Bucket) -> Result<()> {
        tracing::debug!(bucket = %bucket.name, "configuring website hosting");
        self.backend
            .put_bucket_website(&bucket.name, INDEX_DOCUMENT, ERROR_DOCUMENT)
            .await
    }

    /// Region the bucket lives in
    pub async fn get_region_name(&self, bucket: &Bucket) -> Result<String> {
        let location = self.backend.bucket_location(&bucket.name).await?;
        Ok(region_from_location(location.as_deref()))
    }

    /// Public website URL of the bucket
    pub async fn get_bucket_url(&self, bucket: &Bucket) -> Result<String> {
        let region = self.get_region_name(bucket).await?;
        website_url(&bucket.name, &region)
    }

    /// Upload one local file to `key`
    pub async fn upload_file(&self, bucket: &Bucket, path: &Path, key: &str) -> Result<()> {
        let body = std::fs::read(path)?;
        let content_type = content_type_for(key);
        tracing::info!(bucket = %bucket.name, key, content_type = %content_type, "uploading");
        self.backend
            .put_object(&bucket.name, key, body, &content_type)
            .await
    }

    /// Upload every regular file under `pathname` to the bucket
    ///
    /// Keys are paths relative to the resolved root. The first failure stops
    /// the sync and leaves already uploaded objects in place. `on_upload` is
    /// called with each key before it is uploaded.
    pub async fn sync<F>(&self, pathname: &Path, bucket_name: &str, mut on_upload: F) -> Result<usize>
    where
        F: FnMut(&str),
    {
        let root = resolve_root(pathname)?;
        let bucket = Bucket::new(bucket_name);
        let mut uploaded = 0;

        for entry in walk_files(&root) {
            let entry = entry?;
            on_upload(&entry.key);
            self.upload_file(&bucket, &entry.path, &entry.key).await?;
            uploaded += 1;
        }

        tracing::info!(bucket = bucket_name, root = %root.display(), uploaded, "sync complete");
        Ok(uploaded)
    }
}

/// Public-read policy document for a bucket
pub fn public_read_policy(bucket_name: &str) -> String {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "PublicRead",
            "Effect": "Allow",
            "Principal": "*",
            "Action": ["s3:GetObject"],
            "Resource": [format!("arn:aws:s3:::{bucket_name}/*")],
        }]
    })
    .to_string()
}

/// Guess the content type of a key from its extension
pub fn content_type_for(key: &str) -> String {
    mime_guess::from_path(key)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
}

/// Map a raw bucket location constraint to a region name
pub fn region_from_location(location: Option<&str>) -> String {
    match location {
        None | Some("") => DEFAULT_REGION.to_string(),
        Some("EU") => "eu-west-1".to_string(),
        Some(region) => region.to_string(),
    }
}

/// Website URL of a bucket in a region, without a trailing slash
pub fn website_url(bucket_name: &str, region: &str) -> Result<String> {
    let endpoint = get_endpoint(region)?;
    let url = Url::parse(&format!("http://{bucket_name}.{}", endpoint.host))?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}
